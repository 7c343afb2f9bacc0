//! The natural-language rule table
//!
//! One immutable, insertion-ordered sequence of tagged records. Categories
//! are listed in evaluation order and rules within a category keep their
//! declaration order; the first rule that matches anywhere in the table
//! wins. Patterns are searched (not anchored) unless they say otherwise.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Intent group a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    FileListing,
    DirectoryNavigation,
    DirectoryCreation,
    DirectoryDeletion,
    FileCreation,
    FileOperations,
    FileSearch,
    SystemInfo,
    HelpAndInfo,
}

impl IntentCategory {
    /// Categories in evaluation order
    pub const ALL: [IntentCategory; 9] = [
        IntentCategory::FileListing,
        IntentCategory::DirectoryNavigation,
        IntentCategory::DirectoryCreation,
        IntentCategory::DirectoryDeletion,
        IntentCategory::FileCreation,
        IntentCategory::FileOperations,
        IntentCategory::FileSearch,
        IntentCategory::SystemInfo,
        IntentCategory::HelpAndInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::FileListing => "file_listing",
            IntentCategory::DirectoryNavigation => "directory_navigation",
            IntentCategory::DirectoryCreation => "directory_creation",
            IntentCategory::DirectoryDeletion => "directory_deletion",
            IntentCategory::FileCreation => "file_creation",
            IntentCategory::FileOperations => "file_operations",
            IntentCategory::FileSearch => "file_search",
            IntentCategory::SystemInfo => "system_info",
            IntentCategory::HelpAndInfo => "help_and_info",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the captured groups of a rule are cleaned and substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    /// `{path}` from group 1, defaults to `.`
    Path,
    /// `{name}` from group 1, required
    Name,
    /// `{source}` and `{dest}` from groups 1 and 2, both required
    SourceDest,
    /// `{target}` from group 1
    Target,
    /// `{file}` from group 1
    File,
    /// `{name}` from group 1 and `{path}` from group 2
    NameAndPath,
    /// Template is used verbatim
    None,
}

/// Static description of one rule
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub category: IntentCategory,
    pub pattern: &'static str,
    pub template: &'static str,
    pub kind: PlaceholderKind,
}

const fn rule(
    category: IntentCategory,
    pattern: &'static str,
    template: &'static str,
    kind: PlaceholderKind,
) -> RuleSpec {
    RuleSpec {
        category,
        pattern,
        template,
        kind,
    }
}

use IntentCategory::*;
use PlaceholderKind as K;

/// Every rule, in evaluation order
pub const RULE_TABLE: &[RuleSpec] = &[
    // File listing
    rule(
        FileListing,
        r"^(?:show|list|display)\s+(?:me\s+)?(?:all\s+)?(?:the\s+)?(?:files?|contents?)\s+(?:in\s+)?(?:here|(?:this|the\s+current|current)\s+(?:directory|folder|dir))\s*$",
        "ls",
        K::None,
    ),
    rule(
        FileListing,
        r"(?:show|list|display)\s+(?:me\s+)?(?:the\s+)?(?:files?|contents?|directory)\s*(?:in\s+(.+))?",
        "ls {path}",
        K::Path,
    ),
    rule(
        FileListing,
        r"(?:what'?s|what\s+is)\s+in\s+(?:the\s+)?(.+)\s+(?:directory|folder)",
        "ls {path}",
        K::Path,
    ),
    rule(FileListing, r"list\s+(?:all\s+)?files?\s+in\s+(.+)", "ls {path}", K::Path),
    rule(
        FileListing,
        r"show\s+(?:me\s+)?(?:the\s+)?current\s+directory\s+contents?",
        "ls",
        K::None,
    ),
    // Directory navigation
    rule(
        DirectoryNavigation,
        r"(?:go\s+to|change\s+to|navigate\s+to|enter)\s+(?:the\s+)?(.+)\s+(?:directory|folder)",
        "cd {path}",
        K::Path,
    ),
    rule(DirectoryNavigation, r"cd\s+to\s+(.+)", "cd {path}", K::Path),
    rule(
        DirectoryNavigation,
        r"move\s+to\s+(.+)\s+(?:directory|folder)",
        "cd {path}",
        K::Path,
    ),
    rule(DirectoryNavigation, r"go\s+(?:to\s+)?home", "cd ~", K::None),
    rule(
        DirectoryNavigation,
        r"go\s+back\s+(?:to\s+)?parent\s+(?:directory|folder)",
        "cd ..",
        K::None,
    ),
    // Directory creation
    rule(
        DirectoryCreation,
        r"(?:create|make|mkdir)\s+(?:a\s+)?(?:new\s+)?(?:directory|folder)\s+(?:called\s+|named\s+)?(.+)",
        "mkdir {name}",
        K::Name,
    ),
    rule(DirectoryCreation, r"new\s+(?:directory|folder)\s+(.+)", "mkdir {name}", K::Name),
    rule(DirectoryCreation, r"make\s+(?:directory|folder)\s+(.+)", "mkdir {name}", K::Name),
    rule(
        DirectoryCreation,
        r"(?:create|make)\s+(?:folder|directory)\s+(?:called\s+|named\s+)?(.+)",
        "mkdir {name}",
        K::Name,
    ),
    // Directory deletion
    rule(
        DirectoryDeletion,
        r"(?:remove|delete|rm)\s+(?:the\s+)?(?:directory|folder)\s+(?:called\s+|named\s+)?(.+)",
        "rm -r {target}",
        K::Target,
    ),
    rule(
        DirectoryDeletion,
        r"(?:delete|remove)\s+(?:folder|directory)\s+(.+)",
        "rm -r {target}",
        K::Target,
    ),
    rule(
        DirectoryDeletion,
        r"(?:rm|rmdir)\s+(?:the\s+)?(?:directory|folder)\s+(.+)",
        "rm -r {target}",
        K::Target,
    ),
    rule(
        DirectoryDeletion,
        r"^delete\s+([a-zA-Z_][a-zA-Z0-9_]*)$",
        "rm -rf {target}",
        K::Target,
    ),
    rule(
        DirectoryDeletion,
        r"^remove\s+([a-zA-Z_][a-zA-Z0-9_]*)$",
        "rm -rf {target}",
        K::Target,
    ),
    // File creation
    rule(
        FileCreation,
        r"(?:create|make|touch)\s+(?:a\s+)?(?:new\s+)?file\s+(?:called\s+|named\s+)?(.+)",
        "touch {name}",
        K::Name,
    ),
    rule(FileCreation, r"new\s+file\s+(.+)", "touch {name}", K::Name),
    rule(FileCreation, r"create\s+empty\s+file\s+(.+)", "touch {name}", K::Name),
    // File operations
    rule(FileOperations, r"(?:copy|cp)\s+(.+)\s+to\s+(.+)", "cp {source} {dest}", K::SourceDest),
    rule(
        FileOperations,
        r"(?:move|mv|rename)\s+(.+)\s+to\s+(.+)",
        "mv {source} {dest}",
        K::SourceDest,
    ),
    rule(
        FileOperations,
        r"(?:remove|delete|rm)\s+(?:the\s+)?(?:directory|folder)\s+(?:called\s+|named\s+)?(.+)",
        "rm -r {target}",
        K::Target,
    ),
    rule(
        FileOperations,
        r"(?:remove|delete|rm)\s+(?:the\s+)?file\s+(?:called\s+|named\s+)?(.+)",
        "rm {target}",
        K::Target,
    ),
    rule(FileOperations, r"(?:remove|delete|rm)\s+(?:the\s+)?(.+)", "rm -rf {target}", K::Target),
    rule(
        FileOperations,
        r"(?:show|display|cat)\s+(?:the\s+)?(?:contents?\s+of\s+)?(?:file\s+)?(.+)",
        "cat {file}",
        K::File,
    ),
    // File search
    rule(
        FileSearch,
        r"(?:find|search\s+for|locate)\s+(?:files?\s+)?(?:named\s+|called\s+)?(.+)\s+in\s+(.+)",
        "find {path} {name}",
        K::NameAndPath,
    ),
    rule(
        FileSearch,
        r"(?:find|search\s+for|locate)\s+(?:files?\s+)?(?:named\s+|called\s+)?(.+)",
        "find . {name}",
        K::Name,
    ),
    rule(FileSearch, r"where\s+is\s+(?:the\s+)?(?:file\s+)?(.+)", "find . {name}", K::Name),
    // System information
    rule(
        SystemInfo,
        r"(?:show|display|what'?s)\s+(?:the\s+)?(?:current\s+)?(?:working\s+)?directory",
        "pwd",
        K::None,
    ),
    rule(SystemInfo, r"where\s+am\s+i", "pwd", K::None),
    rule(SystemInfo, r"(?:show|list)\s+(?:running\s+)?processes", "ps aux", K::None),
    rule(SystemInfo, r"(?:what\s+)?processes\s+are\s+running", "ps aux", K::None),
    rule(
        SystemInfo,
        r"(?:show|display)\s+(?:system\s+)?(?:memory|ram)\s+usage",
        "free -h",
        K::None,
    ),
    rule(SystemInfo, r"(?:show|display)\s+disk\s+(?:space|usage)", "df -h", K::None),
    rule(SystemInfo, r"(?:show|display)\s+system\s+uptime", "uptime", K::None),
    rule(SystemInfo, r"who\s+(?:am\s+)?i", "whoami", K::None),
    rule(SystemInfo, r"what\s+(?:system|os)\s+am\s+i\s+(?:on|running)", "uname -a", K::None),
    // Help and information
    rule(
        HelpAndInfo,
        r"(?:help|what\s+can\s+(?:i|you)\s+do|show\s+(?:me\s+)?(?:available\s+)?commands)",
        "help",
        K::None,
    ),
    rule(HelpAndInfo, r"(?:show|display)\s+(?:command\s+)?history", "history", K::None),
    rule(HelpAndInfo, r"clear\s+(?:the\s+)?(?:screen|terminal)", "clear", K::None),
];
