use maud::{html, Markup, DOCTYPE};

// Mail clients drop <link> and most <style> blocks, so every rule is inline.
const BODY_STYLE: &str = "font-family: Georgia, serif; max-width: 600px; margin: 0 auto; \
    padding: 20px; background-color: #faf9f7; color: #2d2d2d; text-align: center;";
const HEADER_STYLE: &str = "padding-bottom: 20px; border-bottom: 1px solid #e0e0e0;";
const FOOTER_STYLE: &str = "margin-top: 30px; padding-top: 20px; border-top: 1px solid #e0e0e0; \
    font-size: 12px; color: #888;";

pub fn email_layout(title: &str, content: Markup, footer: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body style=(BODY_STYLE) {
                div style=(HEADER_STYLE) {
                    h1 style="margin: 0; font-weight: normal;" { "🦋 Your Hourly Moth" }
                }
                (content)
                div style=(FOOTER_STYLE) {
                    (footer)
                    p { "Sent with love via the Moth Mailer 🌙" }
                }
            }
        }
    }
}
