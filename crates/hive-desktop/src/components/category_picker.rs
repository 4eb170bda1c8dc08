use dioxus::prelude::*;

use hive_core::Category;

use crate::theme::palette;

/// One button per category; the selected one shows its label.
#[component]
pub fn CategoryPicker(selected: Category, on_select: EventHandler<Category>) -> Element {
    let colors = palette();

    rsx! {
        div {
            class: "category-picker",
            style: "display: flex; gap: 6px;",

            for category in Category::ALL {
                {
                    let is_selected = category == selected;
                    let glyph = category.glyph();
                    let label = category.label();
                    let (background, foreground, padding) = if is_selected {
                        (colors.ink, colors.panel, "0 16px")
                    } else {
                        (colors.panel, colors.ink, "0 8px")
                    };

                    rsx! {
                        button {
                            key: "{category}",
                            title: label,
                            onclick: move |_| on_select.call(category),
                            style: "
                                display: flex;
                                align-items: center;
                                height: 36px;
                                padding: {padding};
                                background: {background};
                                color: {foreground};
                                border: 2px solid {colors.ink};
                                border-radius: 12px;
                            ",
                            span { style: "font-size: 18px;", "{glyph}" }
                            if is_selected {
                                span {
                                    style: "margin-left: 6px; font-size: 10px; font-weight: 900;",
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
