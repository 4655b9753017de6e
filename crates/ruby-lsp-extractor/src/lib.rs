//! Heuristic, line-oriented extraction of Ruby definition sites.
//!
//! This is deliberately not a parser: it scans lines with a small set of
//! anchored patterns and two parallel stacks (nesting, indentation) rather
//! than building an AST. That trade-off buys startup throughput on large
//! Rails trees at the cost of precision on multi-line constructs, heredocs,
//! and anything inside a string literal.

use ruby_lsp_symbols::{SymbolEntry, SymbolKind, Visibility};

/// Extract every recognized definition site from `text`, attributing each
/// entry to `file_path`.
pub fn extract(file_path: &str, text: &str) -> Vec<SymbolEntry> {
    let mut extractor = Extractor::new(file_path);
    for (idx, line) in text.lines().enumerate() {
        extractor.feed_line(idx as u32 + 1, line);
    }
    extractor.entries
}

struct Scope {
    name: String,
    indent: usize,
}

struct Extractor<'a> {
    file_path: &'a str,
    entries: Vec<SymbolEntry>,
    nesting: Vec<Scope>,
    visibility: Visibility,
}

impl<'a> Extractor<'a> {
    fn new(file_path: &'a str) -> Self {
        Self { file_path, entries: Vec::new(), nesting: Vec::new(), visibility: Visibility::Public }
    }

    fn parent(&self) -> String {
        self.nesting.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join("::")
    }

    fn push_entry(
        &mut self,
        name: &str,
        kind: SymbolKind,
        line: u32,
        character: u32,
        separator: &str,
        detail: &str,
    ) {
        let parent = self.parent();
        let fully_qualified_name = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{parent}{separator}{name}")
        };
        self.entries.push(SymbolEntry {
            name: name.to_string(),
            fully_qualified_name,
            kind,
            file_path: self.file_path.to_string(),
            line,
            character,
            parent,
            visibility: self.visibility,
            detail: detail.to_string(),
        });
    }

    fn feed_line(&mut self, line_no: u32, raw_line: &str) {
        let indent = indent_columns(raw_line);
        let trimmed = raw_line.trim_start();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        if let Some(rest) = trimmed.strip_prefix("end") {
            if is_word_boundary(rest) && self.try_pop_scope(indent) {
                return;
            }
        }

        if let Some(name) = parse_class(trimmed) {
            let keyword_col = indent + "class ".len();
            let (name, superclass) = split_superclass(name);
            self.push_entry(name, SymbolKind::Class, line_no, keyword_col as u32, "::", superclass);
            self.nesting.push(Scope { name: name.to_string(), indent });
            self.visibility = Visibility::Public;
            return;
        }

        if let Some(name) = parse_module(trimmed) {
            let keyword_col = indent + "module ".len();
            self.push_entry(name, SymbolKind::Module, line_no, keyword_col as u32, "::", "");
            self.nesting.push(Scope { name: name.to_string(), indent });
            self.visibility = Visibility::Public;
            return;
        }

        if let Some((name, is_singleton)) = parse_method(trimmed) {
            let keyword_col = indent + "def ".len();
            let (kind, separator) = if is_singleton {
                (SymbolKind::SingletonMethod, ".")
            } else {
                (SymbolKind::InstanceMethod, "#")
            };
            self.push_entry(name, kind, line_no, keyword_col as u32, separator, "");
            return;
        }

        if let Some(name) = parse_constant(trimmed) {
            self.push_entry(name, SymbolKind::Constant, line_no, indent as u32, "::", "");
            return;
        }

        if let Some(name) = parse_scope(trimmed) {
            let keyword_col = indent + "scope ".len();
            self.push_entry(name, SymbolKind::Scope, line_no, keyword_col as u32, ".", "");
            return;
        }

        if let Some((macro_name, name)) = parse_association(trimmed) {
            let keyword_col = indent + macro_name.len() + 1;
            self.push_entry(name, SymbolKind::Association, line_no, keyword_col as u32, "#", macro_name);
            return;
        }

        if let Some((macro_name, names)) = parse_attr(trimmed) {
            let keyword_col = indent + macro_name.len() + 1;
            for name in names {
                self.push_entry(name, SymbolKind::AttrAccessor, line_no, keyword_col as u32, "#", macro_name);
            }
            return;
        }

        if let Some(vis) = parse_visibility_modifier(trimmed) {
            self.visibility = vis;
        }
    }

    /// Pop one nesting level if `end`'s indent is at or below the scope's
    /// opening indent. Block `end`s (deeper indent) are ignored.
    fn try_pop_scope(&mut self, end_indent: usize) -> bool {
        match self.nesting.last() {
            Some(scope) if end_indent <= scope.indent => {
                self.nesting.pop();
                self.visibility = Visibility::Public;
                true
            }
            _ => false,
        }
    }
}

fn is_word_boundary(rest: &str) -> bool {
    rest.chars().next().map_or(true, |c| !is_word_char(c))
}

fn indent_columns(line: &str) -> usize {
    let mut columns = 0;
    for ch in line.chars() {
        match ch {
            ' ' => columns += 1,
            '\t' => columns += 2,
            _ => break,
        }
    }
    columns
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn parse_class(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("class ")?;
    let rest = rest.trim_start();
    if rest.starts_with("<<") {
        return None;
    }
    ident_token(rest)
}

fn split_superclass(name_and_rest: &str) -> (&str, &str) {
    match name_and_rest.split_once('<') {
        Some((name, sup)) => (name.trim(), sup.trim()),
        None => (name_and_rest, ""),
    }
}

fn parse_module(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("module ")?;
    ident_token(rest.trim_start())
}

/// Validate and return the remainder of a `class`/`module` line (the name,
/// and for `class` possibly ` < Superclass` trailing it). Splitting off a
/// superclass is `split_superclass`'s job, not this one's.
fn ident_token(rest: &str) -> Option<&str> {
    let rest = rest.trim_end();
    let first = rest.chars().next()?;
    if !first.is_alphabetic() {
        return None;
    }
    Some(rest)
}

fn parse_method(line: &str) -> Option<(&str, bool)> {
    let rest = line.strip_prefix("def ")?;
    let rest = rest.trim_start();
    let (rest, is_singleton) = match rest.strip_prefix("self.") {
        Some(r) => (r, true),
        None => (rest, false),
    };
    let end = rest
        .char_indices()
        .find(|&(_, c)| !is_identifier_char(c) && c != '!' && c != '?' && c != '=')
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    let name = &rest[..end];
    if name.is_empty() {
        return None;
    }
    Some((name, is_singleton))
}

fn parse_constant(line: &str) -> Option<&str> {
    let end = line.find(|c: char| !is_identifier_char(c)).unwrap_or(line.len());
    let candidate = &line[..end];
    let first = candidate.chars().next()?;
    if !first.is_ascii_uppercase() || candidate.chars().any(|c| c.is_ascii_lowercase()) {
        return None;
    }

    let after = line[end..].trim_start();
    let after_eq = after.strip_prefix('=')?;
    if after_eq.starts_with('=') {
        // `==`, not an assignment.
        return None;
    }
    Some(candidate)
}

fn parse_scope(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("scope ")?.trim_start();
    let rest = rest.strip_prefix(':')?;
    symbol_token(rest)
}

const ASSOCIATION_MACROS: [&str; 4] = ["belongs_to", "has_many", "has_one", "has_and_belongs_to_many"];

fn parse_association(line: &str) -> Option<(&'static str, &str)> {
    for macro_name in ASSOCIATION_MACROS {
        if let Some(rest) = line.strip_prefix(macro_name) {
            let rest = rest.strip_prefix(' ')?.trim_start();
            let rest = rest.strip_prefix(':')?;
            let name = symbol_token(rest)?;
            return Some((macro_name, name));
        }
    }
    None
}

const ATTR_MACROS: [&str; 3] = ["attr_accessor", "attr_reader", "attr_writer"];

fn parse_attr(line: &str) -> Option<(&'static str, Vec<&str>)> {
    for macro_name in ATTR_MACROS {
        if let Some(rest) = line.strip_prefix(macro_name) {
            let rest = rest.strip_prefix(' ')?.trim_start();
            let names: Vec<&str> = rest
                .split(',')
                .filter_map(|part| part.trim().strip_prefix(':'))
                .filter_map(symbol_token)
                .collect();
            if names.is_empty() {
                return None;
            }
            return Some((macro_name, names));
        }
    }
    None
}

fn parse_visibility_modifier(line: &str) -> Option<Visibility> {
    match line {
        "private" => Some(Visibility::Private),
        "protected" => Some(Visibility::Protected),
        "public" => Some(Visibility::Public),
        _ => None,
    }
}

fn symbol_token(rest: &str) -> Option<&str> {
    let end = rest.find(|c: char| !is_identifier_char(c) && c != '?' && c != '!').unwrap_or(rest.len());
    let candidate = &rest[..end];
    if candidate.is_empty() {
        None
    } else {
        Some(candidate)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '!' | '?' | '=')
}

/// Locate the word at `character` (a code-point column) on `line`, expanding
/// left and right while characters are "word chars".
pub fn word_at(line: &str, character: u32) -> String {
    let chars: Vec<char> = line.chars().collect();
    let idx = (character as usize).min(chars.len());

    let mut start = idx;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }

    let mut end = idx;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    chars[start..end].iter().collect()
}

/// Convert a snake_case identifier to CamelCase: split on `_`, capitalize
/// the first character of each non-empty part, concatenate.
pub fn capitalize(snake: &str) -> String {
    snake
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
