//! Conversation history as reported by a chat engine.
//!
//! Messages are role-tagged lists of content blocks: plain text, a tool
//! invocation request with structured arguments, or a tool result.

use serde::{Deserialize, Serialize};

use crate::llm::MessageRole;

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: Vec<ContentBlock>,
}

impl ConversationMessage {
    pub fn text(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Concatenated text blocks, ignoring tool blocks.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: ToolResultContent,
    },
}

/// Tool output is either a bare string or nested content blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResultContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_skips_tool_blocks() {
        let message = ConversationMessage {
            role: MessageRole::Assistant,
            content: vec![
                ContentBlock::Text { text: "first".into() },
                ContentBlock::ToolUse {
                    id: "call_1".into(),
                    name: "search".into(),
                    input: serde_json::json!({ "q": "rust" }),
                },
                ContentBlock::Text { text: "second".into() },
            ],
        };
        assert_eq!(message.plain_text(), "first\nsecond");
    }

    #[test]
    fn test_tool_result_content_accepts_string_or_blocks() {
        let plain: ToolResultContent = serde_json::from_str(r#""done""#).unwrap();
        assert_eq!(plain, ToolResultContent::Text("done".into()));

        let nested: ToolResultContent =
            serde_json::from_str(r#"[{"type":"text","text":"inner"}]"#).unwrap();
        assert_eq!(
            nested,
            ToolResultContent::Blocks(vec![ContentBlock::Text { text: "inner".into() }])
        );
    }
}
