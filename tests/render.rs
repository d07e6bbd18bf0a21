use novel_character_analyzer::characters::{mock_characters, Character};
use novel_character_analyzer::page::{Notification, PagePhase, PageView};
use novel_character_analyzer::render::render_page;
use scraper::{ElementRef, Html, Selector};

fn idle_view() -> PageView {
    PageView {
        url: String::new(),
        phase: PagePhase::Idle,
        is_analyzing: false,
        trigger_disabled: false,
        progress: None,
        novel: None,
        characters: Vec::new(),
        notifications: Vec::new(),
    }
}

fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    document.select(&selector).collect()
}

fn text(element: &ElementRef) -> String {
    element.text().collect()
}

#[test]
fn idle_page_has_enabled_form_and_no_results() {
    let document = Html::parse_document(&render_page(&idle_view()));

    let input = &select(&document, "input[name=url]")[0];
    assert!(input.value().attr("disabled").is_none());
    assert_eq!(input.value().attr("placeholder"), Some("https://example.com/novel"));

    assert!(select(&document, ".progress").is_empty());
    assert!(select(&document, ".results").is_empty());
    assert!(select(&document, "meta[http-equiv=refresh]").is_empty());
}

#[test]
fn analyzing_page_disables_controls_and_shows_progress() {
    let view = PageView {
        url: "https://example.com/novel".to_string(),
        phase: PagePhase::Analyzing,
        is_analyzing: true,
        trigger_disabled: true,
        progress: Some(30),
        ..idle_view()
    };
    let document = Html::parse_document(&render_page(&view));

    let input = &select(&document, "input[name=url]")[0];
    assert!(input.value().attr("disabled").is_some());
    assert_eq!(input.value().attr("value"), Some("https://example.com/novel"));

    let button = &select(&document, "form button")[0];
    assert!(button.value().attr("disabled").is_some());
    assert_eq!(text(button), "分析中...");

    let refresh = &select(&document, "meta[http-equiv=refresh]")[0];
    assert_eq!(refresh.value().attr("content"), Some("1"));

    let fill = &select(&document, ".progress .fill")[0];
    assert_eq!(fill.value().attr("style"), Some("width: 30%"));
    assert!(text(&select(&document, ".progress")[0]).contains("正在處理小說內容..."));
}

#[test]
fn result_cards_show_labeled_tiered_bars() {
    let view = PageView {
        phase: PagePhase::Results,
        characters: mock_characters(),
        ..idle_view()
    };
    let document = Html::parse_document(&render_page(&view));

    let cards = select(&document, "article.character");
    assert_eq!(cards.len(), 2);

    let hero = Html::parse_fragment(&cards[0].html());
    assert_eq!(text(&select(&hero, ".name")[0]), "主角");
    assert_eq!(text(&select(&hero, ".summary")[0]), "故事的主要角色，擁有強大的戰鬥能力");

    let labels: Vec<String> = select(&hero, ".label").iter().map(text).collect();
    assert_eq!(labels, ["戰鬥技能", "魔法能力", "魅力值", "研究能力", "生活技能"]);

    let values: Vec<String> = select(&hero, ".value").iter().map(text).collect();
    assert_eq!(values, ["85%", "70%", "60%", "45%", "55%"]);

    let fills: Vec<(String, String)> = select(&hero, ".skill .fill")
        .iter()
        .map(|el| {
            (
                el.value().attr("class").unwrap().to_string(),
                el.value().attr("style").unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(fills[0], ("fill bg-red-500".to_string(), "width: 85%".to_string()));
    assert_eq!(fills[1], ("fill bg-orange-500".to_string(), "width: 70%".to_string()));
    assert_eq!(fills[2], ("fill bg-orange-500".to_string(), "width: 60%".to_string()));
    assert_eq!(fills[3], ("fill bg-yellow-500".to_string(), "width: 45%".to_string()));
    assert_eq!(fills[4], ("fill bg-yellow-500".to_string(), "width: 55%".to_string()));

    assert_eq!(text(&select(&hero, ".appearances")[0]), "出現次數: 156 次");
}

#[test]
fn out_of_range_skills_are_not_clamped() {
    let character = Character {
        id: "x".to_string(),
        name: "n".to_string(),
        summary: "s".to_string(),
        battle_skill: 150,
        magic_skill: -10,
        charm_skill: 0,
        research_skill: 100,
        life_skill: 39,
        appearance_count: 0,
    };
    let view = PageView {
        characters: vec![character],
        ..idle_view()
    };
    let html = render_page(&view);

    assert!(html.contains("fill bg-red-500\" style=\"width: 150%\""));
    assert!(html.contains("fill bg-gray-400\" style=\"width: -10%\""));
}

#[test]
fn user_text_is_escaped() {
    let view = PageView {
        url: "https://example.com/?q=\"><script>alert(1)</script>".to_string(),
        ..idle_view()
    };
    let html = render_page(&view);

    assert!(!html.contains("<script>"));
    let document = Html::parse_document(&html);
    let input = &select(&document, "input[name=url]")[0];
    assert_eq!(
        input.value().attr("value"),
        Some("https://example.com/?q=\"><script>alert(1)</script>")
    );
}

#[test]
fn destructive_notifications_are_marked() {
    let view = PageView {
        notifications: vec![Notification::analysis_failed()],
        ..idle_view()
    };
    let document = Html::parse_document(&render_page(&view));

    let toast = &select(&document, ".toast")[0];
    assert_eq!(toast.value().attr("class"), Some("toast destructive"));
    assert_eq!(text(&select(&document, ".toast-title")[0]), "分析失敗");
}
