//! Markdown for the read-only in-session views.

use std::fmt::Write as _;

use chatline_types::history::{ContentBlock, ConversationMessage, ToolResultContent};
use chatline_types::llm::MessageRole;
use chatline_types::tool::{ServerInfo, ServerTools, ServerTransport};

pub const NO_SERVERS: &str = "No servers configured.";
pub const TOOLS_DISABLED: &str = "Tools are currently disabled for this model.";

pub fn help() -> String {
    let mut md = String::new();
    md.push_str("# Available Commands\n\n");
    md.push_str("The following commands are available:\n\n");
    md.push_str("- **/help**: Show this help message\n");
    md.push_str("- **/tools**: List all available tools\n");
    md.push_str("- **/servers**: List configured tool servers\n");
    md.push_str("- **/history**: Display conversation history\n");
    md.push_str("- **/quit**: Exit the application\n");
    md.push_str("\nYou can also press Ctrl+C at any time to quit.\n");

    md.push_str("\n## Available Models\n\n");
    md.push_str("Specify models using the --model or -m flag as `provider:model`:\n\n");
    md.push_str("- **Anthropic**: `anthropic:claude-3-5-sonnet-latest`\n");
    md.push_str("- **OpenAI**: `openai:gpt-4o`\n");
    md.push_str("- **Google**: `google:gemini-2.0-flash`\n");
    md.push_str("- **Ollama**: `ollama:modelname`\n");
    md.push_str("\nExamples:\n");
    md.push_str("```\n");
    md.push_str("chatline -m anthropic:claude-3-5-sonnet-latest\n");
    md.push_str("chatline -m ollama:qwen2.5:3b\n");
    md.push_str("```\n");
    md
}

/// Header lines shown as `Key: [REDACTED]`. Lines without a colon are skipped.
pub fn redact_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter_map(|header| header.split_once(':'))
        .map(|(key, _)| format!("{}: [REDACTED]", key.trim()))
        .collect()
}

pub fn servers(servers: &[ServerInfo]) -> String {
    if servers.is_empty() {
        return format!("{NO_SERVERS}\n");
    }

    let mut md = String::new();
    for server in servers {
        let _ = writeln!(md, "# {}\n", server.name);
        match &server.transport {
            ServerTransport::Network { url, headers } => {
                md.push_str("*Url*\n");
                let _ = writeln!(md, "`{url}`\n");
                md.push_str("*headers*\n");
                let redacted = redact_headers(headers);
                if redacted.is_empty() {
                    md.push_str("*None*\n");
                }
                for header in redacted {
                    let _ = writeln!(md, "`{header}`");
                }
            }
            ServerTransport::Process { command, args } => {
                md.push_str("*Command*\n");
                let _ = writeln!(md, "`{command}`\n");
                md.push_str("*Arguments*\n");
                if args.is_empty() {
                    md.push_str("*None*\n");
                } else {
                    let _ = writeln!(md, "`{}`", args.join(" "));
                }
            }
        }
        if let Some(role) = server.interface {
            let _ = writeln!(md, "\n*Interface*\n`{role}`");
        }
        md.push('\n');
    }
    md
}

/// Tools view.
///
/// Returns the markdown listing and one error line per server whose tools
/// could not be listed. `None` means the engine reported no servers.
pub fn tools(listing: &[ServerTools]) -> Option<(String, Vec<String>)> {
    if listing.is_empty() {
        return None;
    }

    let mut md = String::new();
    let mut errors = Vec::new();
    for entry in listing {
        let tools = match &entry.tools {
            Ok(tools) => tools,
            Err(e) => {
                errors.push(format!("Error fetching tools from {}: {e}", entry.server));
                continue;
            }
        };
        let _ = writeln!(md, "- {}", entry.server);
        if tools.is_empty() {
            md.push_str("  - No tools available\n");
        }
        for tool in tools {
            let _ = writeln!(md, "  - **{}**", tool.name);
            let _ = writeln!(md, "    - {}", tool.description);
        }
    }
    Some((md, errors))
}

pub fn history(messages: &[ConversationMessage]) -> String {
    let mut md = String::from("# Conversation History\n\n");
    for message in messages {
        let title = match message.role {
            MessageRole::Assistant => "## Assistant",
            MessageRole::System => "## System",
            MessageRole::User | MessageRole::Tool => "## User",
        };
        let _ = writeln!(md, "{title}\n");
        for block in &message.content {
            write_block(&mut md, block);
        }
        md.push_str("---\n\n");
    }
    md
}

fn write_block(md: &mut String, block: &ContentBlock) {
    match block {
        ContentBlock::Text { text } => {
            md.push_str("### Text\n");
            let _ = writeln!(md, "{text}\n");
        }
        ContentBlock::ToolUse { name, input, .. } => {
            md.push_str("### Tool Use\n");
            let _ = writeln!(md, "**Tool:** {name}\n");
            if input.is_null() {
                return;
            }
            match serde_json::to_string_pretty(input) {
                Ok(pretty) => {
                    md.push_str("**Input:**\n```json\n");
                    md.push_str(&pretty);
                    md.push_str("\n```\n\n");
                }
                Err(e) => {
                    let _ = writeln!(md, "Error formatting input: {e}\n");
                }
            }
        }
        ContentBlock::ToolResult {
            tool_use_id,
            content,
        } => {
            md.push_str("### Tool Result\n");
            let _ = writeln!(md, "**Tool ID:** {tool_use_id}\n");
            match content {
                ToolResultContent::Text(text) => fenced(md, text),
                ToolResultContent::Blocks(blocks) => {
                    for inner in blocks {
                        if let ContentBlock::Text { text } = inner {
                            fenced(md, text);
                        }
                    }
                }
            }
        }
    }
}

fn fenced(md: &mut String, text: &str) {
    md.push_str("```\n");
    md.push_str(text);
    md.push_str("\n```\n\n");
}
