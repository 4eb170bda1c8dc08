//! Note card component

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use dioxus::prelude::*;

use hive_core::models::Attachment;
use hive_core::screen::{COLLAPSE_LABEL, EXPAND_LABEL};
use hive_core::{Note, NoteId};

use crate::markdown::render_markdown;
use crate::theme::palette;

/// Day the note was created, as `month/day/year` in `zone`.
fn card_date<Tz>(created_at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at
        .with_timezone(zone)
        .format("%-m/%-d/%Y")
        .to_string()
}

/// A single note rendered in the board.
#[component]
pub fn NoteCard(
    note: Note,
    expanded: bool,
    on_edit: EventHandler<NoteId>,
    on_delete: EventHandler<NoteId>,
    on_toggle: EventHandler<NoteId>,
) -> Element {
    let colors = palette();
    let category = note.category;
    let badge = category.badge();
    let badge_background = category.background();
    let badge_foreground = category.foreground();
    let html = render_markdown(&note.content);
    let date = card_date(&note.created_at, &Local);
    let max_height = if expanded { "none" } else { "220px" };
    let toggle_label = if expanded { COLLAPSE_LABEL } else { EXPAND_LABEL };

    let edit_id = note.id.clone();
    let delete_id = note.id.clone();
    let toggle_id = note.id.clone();

    rsx! {
        div {
            class: "hive-card",
            style: "
                position: relative;
                padding: 24px;
                background: rgba(255, 255, 255, 0.95);
                border: 4px solid {colors.ink};
                border-radius: 32px;
                box-shadow: 8px 8px 0 0 {colors.ink};
            ",

            div {
                class: "note-actions",
                style: "position: absolute; top: 16px; right: 16px; display: flex; gap: 6px;",
                button {
                    title: "Edit",
                    onclick: move |_| on_edit.call(edit_id.clone()),
                    style: "
                        padding: 4px 8px;
                        background: {colors.panel};
                        border: 2px solid {colors.ink};
                        border-radius: 8px;
                    ",
                    "✎"
                }
                button {
                    title: "Delete",
                    onclick: move |_| on_delete.call(delete_id.clone()),
                    style: "
                        padding: 4px 8px;
                        background: {colors.danger};
                        color: {colors.panel};
                        border: 2px solid {colors.ink};
                        border-radius: 8px;
                    ",
                    "✕"
                }
            }

            div {
                class: "note-badge",
                style: "
                    display: inline-block;
                    margin-bottom: 16px;
                    padding: 2px 12px;
                    background: {badge_background};
                    color: {badge_foreground};
                    border: 2px solid {colors.ink};
                    border-radius: 8px;
                    font-size: 10px;
                    font-weight: 900;
                    text-transform: uppercase;
                ",
                "{badge}"
            }

            div {
                class: "hive-markdown",
                style: "max-height: {max_height}; overflow: hidden; font-weight: 500;",
                dangerous_inner_html: "{html}",
            }

            if note.needs_expansion() {
                button {
                    onclick: move |_| on_toggle.call(toggle_id.clone()),
                    style: "
                        margin-top: 12px;
                        padding: 6px 12px;
                        background: {colors.highlight};
                        border: 2px solid {colors.ink};
                        border-radius: 12px;
                        font-size: 10px;
                        font-weight: 900;
                        text-transform: uppercase;
                    ",
                    "{toggle_label}"
                }
            }

            {match note.attachment() {
                Some(Attachment::Image(url)) => rsx! {
                    div {
                        style: "
                            margin-top: 16px;
                            border: 2px solid {colors.ink};
                            border-radius: 12px;
                            overflow: hidden;
                        ",
                        img { src: "{url}", alt: "attachment", style: "display: block; width: 100%;" }
                    }
                },
                Some(Attachment::Document(url)) => rsx! {
                    a {
                        href: "{url}",
                        target: "_blank",
                        rel: "noreferrer",
                        style: "
                            display: block;
                            margin-top: 16px;
                            padding: 12px;
                            background: {colors.highlight};
                            border: 2px solid {colors.ink};
                            border-radius: 12px;
                            color: {colors.ink};
                            font-size: 10px;
                            font-weight: 900;
                            text-align: center;
                            text-transform: uppercase;
                            text-decoration: none;
                        ",
                        "View Document 📎"
                    }
                },
                None => rsx! {},
            }}

            div {
                style: "
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    margin-top: 24px;
                    padding-top: 16px;
                    border-top: 2px solid {colors.ink};
                    font-style: italic;
                ",
                span {
                    style: "font-size: 9px; font-weight: 900; letter-spacing: 0.1em; opacity: 0.6;",
                    "{date}"
                }
                span { style: "font-size: 20px;", "🍯" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn card_date_uses_the_given_zone() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 22, 30, 0).unwrap();
        assert_eq!(card_date(&created_at, &Utc), "5/1/2024");

        let east = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(card_date(&created_at, &east), "5/2/2024");
    }
}
