use marketbrief::config::AppConfig;
use marketbrief::domain::values::publish_target::{PublishTarget, TargetKind};
use std::collections::HashMap;
use std::io::Write;

fn lookup(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<&'static str, String> = pairs.into_iter().collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_prompt_file_overrides_builtin() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Summarize in {tone}:\n{data}\n").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let cfg = AppConfig::from_lookup(lookup(vec![
        ("MARKETBRIEF_DIGEST_PROMPT_FILE", path),
        ("MARKETBRIEF_PROMPT_TONE", "plain English".into()),
    ]))
    .unwrap();

    assert_eq!(
        cfg.pipeline.digest_prompt.render("N225 up"),
        "Summarize in plain English:\nN225 up\n"
    );
}

#[test]
fn test_prompt_file_without_data_slot_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "no data slot here").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let err = AppConfig::from_lookup(lookup(vec![("MARKETBRIEF_ARTICLE_PROMPT_FILE", path)]))
        .unwrap_err();

    assert!(err.to_string().contains("{data}"));
}

#[test]
fn test_missing_prompt_file_rejected() {
    let err = AppConfig::from_lookup(lookup(vec![(
        "MARKETBRIEF_DIGEST_PROMPT_FILE",
        "/nonexistent/prompt.txt".into(),
    )]))
    .unwrap_err();

    assert!(err.to_string().contains("cannot read prompt file"));
}

#[test]
fn test_webhook_alias_selects_discord() {
    let cfg = AppConfig::from_lookup(lookup(vec![
        ("MARKETBRIEF_TARGET", "webhook".into()),
        ("DISCORD_WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc".into()),
    ]))
    .unwrap();

    assert_eq!(cfg.default_target, TargetKind::Discord);
    match cfg.publish_target(cfg.default_target) {
        PublishTarget::Webhook(hook) => {
            assert_eq!(hook.url.as_deref(), Some("https://discord.com/api/webhooks/1/abc"))
        }
        other => panic!("unexpected target {other:?}"),
    }
}
