//! Server-side rendering of the analyzer page.

use crate::characters::{skill_tier, Character};
use crate::page::{Notification, NotificationVariant, PageView};

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: linear-gradient(135deg, #eff6ff, #e0e7ff); min-height: 100vh; }
.container { max-width: 72rem; margin: 0 auto; padding: 1.5rem; }
header { text-align: center; margin-bottom: 2rem; }
.card { background: #fff; border-radius: 0.75rem; box-shadow: 0 10px 15px rgba(0,0,0,.1); padding: 1.5rem; margin-bottom: 2rem; }
.muted { color: #6b7280; }
.row { display: flex; gap: 1rem; }
.row input { flex: 1; padding: 0.5rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.skill { margin-bottom: 1rem; }
.skill-head { display: flex; justify-content: space-between; font-size: 0.875rem; }
.track { width: 100%; background: #f3f4f6; border-radius: 9999px; height: 0.5rem; overflow: hidden; }
.fill { height: 0.5rem; border-radius: 9999px; }
.bg-red-500 { background: #ef4444; }
.bg-orange-500 { background: #f97316; }
.bg-yellow-500 { background: #eab308; }
.bg-gray-400 { background: #9ca3af; }
.bg-primary { background: #4f46e5; }
.toast { border-radius: 0.5rem; padding: 0.75rem 1rem; margin-bottom: 1rem; background: #fff; border: 1px solid #e5e7eb; }
.toast.destructive { background: #fee2e2; border-color: #ef4444; }
"#;

pub fn render_page(view: &PageView) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n<meta charset=\"utf-8\">\n");
    if view.is_analyzing {
        // Re-poll until the running submission settles.
        html.push_str("<meta http-equiv=\"refresh\" content=\"1\">\n");
    }
    html.push_str("<title>小說角色分析器</title>\n<style>");
    html.push_str(STYLES);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str("<header>\n<h1>小說角色分析器</h1>\n");
    html.push_str("<p class=\"muted\">AI 智能分析小說角色能力與特徵</p>\n</header>\n");

    if !view.notifications.is_empty() {
        html.push_str("<section class=\"toasts\">\n");
        for notification in &view.notifications {
            render_notification(&mut html, notification);
        }
        html.push_str("</section>\n");
    }

    render_input_card(&mut html, view);

    if !view.characters.is_empty() {
        html.push_str("<section class=\"results\">\n<h2>角色分析結果</h2>\n<div class=\"grid\">\n");
        for character in &view.characters {
            render_character(&mut html, character);
        }
        html.push_str("</div>\n</section>\n");
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_notification(html: &mut String, notification: &Notification) {
    let class = match notification.variant {
        NotificationVariant::Default => "toast",
        NotificationVariant::Destructive => "toast destructive",
    };
    html.push_str(&format!(
        "<div class=\"{}\" role=\"status\"><strong class=\"toast-title\">{}</strong><p class=\"toast-description\">{}</p></div>\n",
        class,
        escape(&notification.title),
        escape(&notification.description),
    ));
}

fn render_input_card(html: &mut String, view: &PageView) {
    let disabled = if view.trigger_disabled { " disabled" } else { "" };
    let button_label = if view.is_analyzing { "分析中..." } else { "開始分析" };

    html.push_str("<section class=\"card\">\n<h2>開始分析</h2>\n");
    html.push_str("<p class=\"muted\">輸入小說網址，AI 將自動抓取內容並分析角色特徵</p>\n");
    html.push_str("<form method=\"post\" action=\"/analyze\" class=\"row\">\n");
    html.push_str(&format!(
        "<input type=\"url\" name=\"url\" placeholder=\"https://example.com/novel\" value=\"{}\"{}>\n",
        escape(&view.url),
        disabled,
    ));
    html.push_str(&format!("<button type=\"submit\"{}>{}</button>\n", disabled, button_label));
    html.push_str("</form>\n");

    if let Some(progress) = view.progress {
        html.push_str(&format!(
            "<div class=\"progress\"><div class=\"track\"><div class=\"fill bg-primary\" style=\"width: {}%\"></div></div><p class=\"muted\">正在處理小說內容...</p></div>\n",
            progress,
        ));
    }

    html.push_str("</section>\n");
}

fn render_character(html: &mut String, character: &Character) {
    html.push_str(&format!(
        "<article class=\"card character\" data-id=\"{}\">\n<h3 class=\"name\">{}</h3>\n<p class=\"muted summary\">{}</p>\n",
        escape(&character.id),
        escape(&character.name),
        escape(&character.summary),
    ));

    for (skill, value) in character.skills() {
        // Width follows the raw value; nothing is clamped.
        html.push_str(&format!(
            "<div class=\"skill\"><div class=\"skill-head\"><span class=\"label\">{}</span><span class=\"value muted\">{}%</span></div><div class=\"track\"><div class=\"fill {}\" style=\"width: {}%\"></div></div></div>\n",
            skill.label(),
            value,
            skill_tier(value).css_class(),
            value,
        ));
    }

    html.push_str(&format!(
        "<p class=\"muted appearances\">出現次數: {} 次</p>\n</article>\n",
        character.appearance_count,
    ));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
