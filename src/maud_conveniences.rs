use crate::controllers::notification::{Notification, Severity};
use maud::{Markup, Render, html};

pub fn render_table<'a>(
    titles: impl IntoIterator<Item = &'a str>,
    items: Vec<Vec<Markup>>,
) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in titles {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody {
                    @for row in items {
                        tr {
                            @for col in row {
                                td class="py-2 px-4 border-b border-gray-600 text-gray-200" {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 class="text-xl font-semibold mb-2" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, element: Markup, error: Option<&str>) -> Markup {
    html! {
        div class="mb-4" id={"field-" (id)} {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
            @if let Some(error) = error {
                p class="text-red-400 text-xs italic mt-1" {(error)}
            }
        }
    }
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

/// `dismiss_url` gets the notification id posted back, `refresh_url` is re-fetched once the
/// notification should have gone away on its own.
pub fn toast(
    notification: &Notification,
    dismiss_url: &str,
    refresh_url: &str,
    target: &str,
    expires_after_ms: u128,
) -> Markup {
    let colours = match notification.severity {
        Severity::Success => "bg-green-100 border-green-400 text-green-700",
        Severity::Error => "bg-red-100 border-red-400 text-red-700",
    };

    html! {
        div role="alert" data-severity=(notification.severity.as_str())
            class={"border px-4 py-3 rounded relative mb-4 flex justify-between " (colours)}
            hx-get=(refresh_url) hx-trigger={"load delay:" (expires_after_ms + 100) "ms"} hx-target=(target) hx-swap="outerHTML" {
            span {(notification.message)}
            button class="font-bold ml-4" hx-post=(dismiss_url) hx-vals={"{\"id\": \"" (notification.id) "\"}"} hx-target=(target) hx-swap="outerHTML" {
                "×"
            }
        }
    }
}
