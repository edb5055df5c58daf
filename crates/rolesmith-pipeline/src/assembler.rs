//! Layer assembly: render cognition, role, and state layers into one artifact.
//!
//! Pure: the output depends only on the arguments. Block order is fixed and
//! consumers rely on it.

use crate::clean::clean_content;
use rolesmith_core::{
    AssemblyMode, CognitionStatus, Dependency, DependencyBundle, RoleDocument, SectionKind,
};

pub const RECALL_TOOL: &str = "mcp__promptx__recall";
pub const REMEMBER_TOOL: &str = "mcp__promptx__remember";

pub const THOUGHTS_HEADING: &str = "## 💭 Thinking Patterns";
pub const EXECUTIONS_HEADING: &str = "## ⚡ Execution Skills";

pub fn section_heading(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Personality => "## 🎭 Personality",
        SectionKind::Principle => "## 🔧 Principles",
        SectionKind::Knowledge => "## 📚 Knowledge",
    }
}

pub fn title(role_id: &str, mode: AssemblyMode) -> String {
    match mode {
        AssemblyMode::Command => format!("# 🎭 Role Activation: {}", role_id),
        AssemblyMode::Subagent => format!("# 🤖 Subagent: {}", role_id),
    }
}

/// Last line of command-mode output.
pub fn activation_line(role_id: &str) -> String {
    format!("🎯 Role `{}` is active. Begin working in this role now.", role_id)
}

fn cognition_block(role_id: &str, cognition: &CognitionStatus) -> String {
    if cognition.has_network {
        format!(
            "## 🧠 Cognitive Network\n\n\
             An experience network is established for `{role}`.\n\
             - Before starting a task, use `recall` with role `{role}` to retrieve related experience.\n\
             - After finishing, use `remember` with role `{role}` to store what was learned.",
            role = role_id
        )
    } else {
        format!(
            "## 🧠 Cognitive Network\n\n\
             The cognitive network for `{role}` is not yet established.\n\
             - Use `remember` with role `{role}` to record key experiences as you work.\n\
             - Once memories exist, `recall` retrieves them in later sessions.",
            role = role_id
        )
    }
}

/// Heading plus cleaned body; a body that cleans to nothing leaves the heading alone.
fn titled(heading: &str, body: &str) -> String {
    let body = clean_content(body);
    if body.is_empty() {
        heading.to_string()
    } else {
        format!("{}\n\n{}", heading, body)
    }
}

fn push_dependencies(blocks: &mut Vec<String>, heading: &str, deps: &[Dependency]) {
    if deps.is_empty() {
        return;
    }
    blocks.push(heading.to_string());
    for dep in deps {
        blocks.push(titled(&format!("### {}", dep.id), &dep.content));
    }
}

fn state_block(role_id: &str, mode: AssemblyMode) -> String {
    match mode {
        AssemblyMode::Command => format!(
            "## 🚀 Activation\n\n\
             ✅ Role `{}` has been loaded with its personality, principles, and skills.",
            role_id
        ),
        AssemblyMode::Subagent => format!(
            "## 👋 Self-Introduction\n\n\
             I am the `{}` assistant. I work from the personality, principles, and skills \
             described above, consult my cognitive network when one exists, and return \
             focused results that stay consistent with this role.",
            role_id
        ),
    }
}

fn tools_block() -> String {
    format!(
        "## 🛠️ Memory Tools\n\n\
         - `recall`: retrieve related experience from the cognitive network (tool `{}`)\n\
         - `remember`: store new experience in the cognitive network (tool `{}`)",
        RECALL_TOOL, REMEMBER_TOOL
    )
}

/// Render the final artifact. `bundle.knowledges` is intentionally not rendered.
pub fn assemble_content(
    doc: &RoleDocument,
    bundle: &DependencyBundle,
    cognition: &CognitionStatus,
    mode: AssemblyMode,
) -> String {
    let mut blocks = vec![title(&doc.id, mode), cognition_block(&doc.id, cognition)];

    for (kind, text) in doc.sections.present() {
        blocks.push(titled(section_heading(kind), text));
    }

    push_dependencies(&mut blocks, THOUGHTS_HEADING, &bundle.thoughts);
    push_dependencies(&mut blocks, EXECUTIONS_HEADING, &bundle.executions);

    blocks.push(state_block(&doc.id, mode));
    blocks.push(tools_block());
    if mode == AssemblyMode::Command {
        blocks.push(activation_line(&doc.id));
    }

    blocks.join("\n\n")
}
