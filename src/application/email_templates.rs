use url::Url;
use uuid::Uuid;

const BRAND_NAME: &str = "AI Stack";

fn origin_label(app_origin: &str) -> String {
    Url::parse(app_origin)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .unwrap_or_else(|| app_origin.to_string())
}

pub fn primary_button(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{url}" style="display:inline-block;padding:12px 18px;background-color:#111827;color:#ffffff;text-decoration:none;border-radius:8px;font-weight:600;">{label}</a>"#
    )
}

/// Confirmation sent right after someone joins the waitlist. The status
/// link is keyed by the entry's lookup token, not the email address.
pub fn waitlist_confirm_email(app_origin: &str, lookup_token: Uuid) -> (String, String) {
    let subject = format!("You're on the {BRAND_NAME} waitlist");
    let status_url = format!("{}/waitlist/{}", app_origin.trim_end_matches('/'), lookup_token);
    let button = primary_button(&status_url, "View your position");

    let html = format!(
        r#"<div style="font-family:ui-sans-serif,system-ui,sans-serif;max-width:520px;margin:0 auto;padding:32px 24px;">
  <h1 style="margin:0;font-size:22px;color:#111827;">You're on the list</h1>
  <p style="margin:16px 0 0;color:#374151;">Thanks for joining the {BRAND_NAME} waitlist. We'll email you when it's your turn. In the meantime you can check where you stand:</p>
  <p style="margin:20px 0 0;">{button}</p>
  <p style="margin:24px 0 0;color:#9ca3af;font-size:12px;">You received this because you signed up at {origin}.</p>
</div>"#,
        origin = origin_label(app_origin),
    );

    (subject, html)
}
