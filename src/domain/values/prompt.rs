//! Prompt templates for the summarizer.
//!
//! A template is plain text with `{slot}` placeholders. `{data}` is
//! mandatory; `{tone}`, `{length}`, `{audience}` and `{formatting}` are
//! filled from [`PromptSlots`]. Unknown placeholders are left verbatim so
//! templates may contain literal braces.

use serde::Serialize;

const DIGEST_TEMPLATE: &str = "\
あなたはプロの金融アナリストです。以下の市場データとニュース見出しを基に、今日の日本市場の動向を簡潔にまとめてください。
もしデータが「取得エラー」や「取得失敗」となっている場合は、「本日はデータの取得に失敗しました」と正直に書いてください。

{data}

要件:
- {length}
- {audience}
- トーンは{tone}
- {formatting}
";

const ARTICLE_TEMPLATE: &str = "\
あなたはプロの金融ニュース編集者です。以下のニュース記事の要点を読者向けに要約してください。

{data}

要件:
- {length}
- {audience}
- トーンは{tone}
- {formatting}
";

/// Configurable values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSlots {
    pub tone: String,
    pub length: String,
    pub audience: String,
    pub formatting: String,
}

impl Default for PromptSlots {
    fn default() -> Self {
        Self {
            tone: "「です・ます」調".to_string(),
            length: "300文字程度".to_string(),
            audience: "ビジネスマン向けに簡潔に".to_string(),
            formatting: "タイトルには見出し記号（##）を使い、引用記法（>）は使わないでください。リンクは別途付記されるため本文に含めないでください".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    slots: PromptSlots,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>, slots: PromptSlots) -> Result<Self, String> {
        let template = template.into();
        if !template.contains("{data}") {
            return Err("prompt template must contain a {data} placeholder".to_string());
        }
        Ok(Self { template, slots })
    }

    /// Market overview built from the whole collected document.
    pub fn digest() -> Self {
        Self {
            template: DIGEST_TEMPLATE.to_string(),
            slots: PromptSlots::default(),
        }
    }

    /// Summary of a single feed entry.
    pub fn article() -> Self {
        Self {
            template: ARTICLE_TEMPLATE.to_string(),
            slots: PromptSlots::default(),
        }
    }

    pub fn with_slots(mut self, slots: PromptSlots) -> Self {
        self.slots = slots;
        self
    }

    /// Fills every placeholder in one pass, so braces inside `data` are
    /// never re-interpreted.
    pub fn render(&self, data: &str) -> String {
        let mut out = String::with_capacity(self.template.len() + data.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let name = &after[..close];
            match self.slot_value(name, data) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }

    fn slot_value<'a>(&'a self, name: &str, data: &'a str) -> Option<&'a str> {
        match name {
            "data" => Some(data),
            "tone" => Some(&self.slots.tone),
            "length" => Some(&self.slots.length),
            "audience" => Some(&self.slots.audience),
            "formatting" => Some(&self.slots.formatting),
            _ => None,
        }
    }
}
