pub fn render_notification(
    recipient_name: &str,
    actor_name: &str,
    action_phrase: &str,
    entity_title: &str,
    base_url: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <p>Hi {recipient_name},</p>
    <p><strong>{actor_name}</strong> {action_phrase}: <em>{entity_title}</em></p>
    <p><a href="{base_url}/dashboard" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Open Tablero</a></p>
    <p style="color: #666; font-size: 14px;">You can mark notifications as read from the dashboard bell.</p>
</body>
</html>"#
    )
}
