//! Reference resolution.
//!
//! Turns detected citation text into qualifier paths against a document
//! tree. A citation is split on " of " into fragments; every sub-resolver
//! runs on every fragment and their results are unioned, grouped by node
//! kind and combined into candidate paths via a Cartesian product. Each
//! candidate is then completed with the citing node's own ancestry and
//! sorted by depth, ready for [`resolve_loose`].
//!
//! Ambiguity is preserved: a citation may end up with several qualifier
//! paths and a path may match several tree nodes. Nothing here ever
//! auto-picks one.

mod context;

pub use context::ResolutionContext;

use std::cmp::Reverse;
use std::sync::LazyLock;

use regex::Regex;

use crate::citation::{Citation, QualifierPath};
use crate::detect::fragments::{
    or_range, NumberFormat, CONJUNCTION, DOCUMENT_NUMBERING, NUMBER, ORDINAL,
};
use crate::detect::CitationDetector;
use crate::diagnostics::DiagnosticKind;
use crate::error::{LexrefError, Result};
use crate::numerals::ordinal_to_decimal;
use crate::tree::{resolve_loose, DocumentTree, NodeId, NodeKind, Specifier};

/// A numbered-list sub-resolver: a pattern locating the list in a
/// fragment plus the token format to translate its members.
struct ListRule {
    kind: NodeKind,
    format: NumberFormat,
    main: Regex,
    token: Regex,
}

impl ListRule {
    /// "<Kind(s)> N[, M][ to P][ and Q]" anchored at the fragment start.
    fn keyword_list(kind: NodeKind, format: NumberFormat) -> Self {
        let tor = or_range(format.fragment());
        let main = Regex::new(&format!(
            r"(?i)^{keyword}s?\s({tor}(?:,\s{tor})*(?:\s{CONJUNCTION}\s{tor})*)",
            keyword = kind.keyword()
        ))
        .expect("valid regex");
        Self {
            kind,
            format,
            main,
            token: Self::token_pattern(format),
        }
    }

    /// Tight notation: a number directly followed by parenthesized
    /// tokens, "Article 22(1) and (4)" or "paragraph 2(b), (d) to (f)".
    fn tight(kind: NodeKind, format: NumberFormat) -> Self {
        let tor = or_range(format.fragment());
        let main = Regex::new(&format!(
            r"(?i)^.*{NUMBER}({tor}(?:,\s{tor})*(?:\s{CONJUNCTION}\s{tor})*)"
        ))
        .expect("valid regex");
        Self {
            kind,
            format,
            main,
            token: Self::token_pattern(format),
        }
    }

    fn token_pattern(format: NumberFormat) -> Regex {
        let fragment = format.fragment();
        Regex::new(&format!(r"(?i)({fragment})(?:\sto\s({fragment}))?")).expect("valid regex")
    }

    /// Extract one specifier per listed number, ranges expanded
    /// inclusively.
    fn extract(&self, fragment: &str) -> Vec<Specifier> {
        let Some(caps) = self.main.captures(fragment) else {
            return Vec::new();
        };
        let list = caps.get(1).map_or("", |m| m.as_str());

        let mut specifiers = Vec::new();
        for tokens in self.token.captures_iter(list) {
            let Some(first) = self.format.translate(&tokens[1]) else {
                continue;
            };
            match tokens.get(2).and_then(|m| self.format.translate(m.as_str())) {
                Some(end) => {
                    for number in first..=end {
                        specifiers.push(Specifier::new(self.kind, Some(number)));
                    }
                }
                None => specifiers.push(Specifier::new(self.kind, Some(first))),
            }
        }
        specifiers
    }
}

/// Keyword-list rules in application order. Chapter appears twice because
/// drafting practice numbers chapters with both romans and decimals.
static KEYWORD_RULES: LazyLock<Vec<ListRule>> = LazyLock::new(|| {
    vec![
        ListRule::keyword_list(NodeKind::Article, NumberFormat::Decimal),
        ListRule::keyword_list(NodeKind::Paragraph, NumberFormat::Decimal),
        ListRule::keyword_list(NodeKind::Subparagraph, NumberFormat::Decimal),
        ListRule::keyword_list(NodeKind::Point, NumberFormat::Letter),
        ListRule::keyword_list(NodeKind::Chapter, NumberFormat::Roman),
        ListRule::keyword_list(NodeKind::Title, NumberFormat::Roman),
        ListRule::keyword_list(NodeKind::Chapter, NumberFormat::Decimal),
        ListRule::keyword_list(NodeKind::Section, NumberFormat::Decimal),
    ]
});

/// Tight-notation rules. Parenthesized digit tokens belong to the
/// paragraph rule and letter tokens to the point rule, so "5(2)(a)"
/// contributes one paragraph and one point component.
static TIGHT_RULES: LazyLock<Vec<ListRule>> = LazyLock::new(|| {
    vec![
        ListRule::tight(NodeKind::Paragraph, NumberFormat::ParenNumber),
        ListRule::tight(NodeKind::Point, NumberFormat::Letter),
    ]
});

const KIND_KEYWORDS: &str =
    "(?:article|chapter|title|section|paragraph|subparagraph|point|indent)";
const DOCUMENT_KEYWORDS: &str = "(?:regulation|directive|treaty|document)";

static THIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^this\s({KIND_KEYWORDS}|{DOCUMENT_KEYWORDS})")).expect("valid regex")
});

static THAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^that\s({KIND_KEYWORDS}|{DOCUMENT_KEYWORDS})")).expect("valid regex")
});

static THOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^those\s({KIND_KEYWORDS}|{DOCUMENT_KEYWORDS})s")).expect("valid regex")
});

static ORDINAL_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^the\s({ORDINAL})\s({KIND_KEYWORDS})")).expect("valid regex")
});

/// Conjoined directive numbering, "Directives 95/46/EC and 97/66/EC".
/// Other document types are not cited in the plural in practice.
static MULTI_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:(?:{ORDINAL}\s)?Council\s)?Directives({DOCUMENT_NUMBERING}(?:,{DOCUMENT_NUMBERING})*(?:\s{CONJUNCTION}{DOCUMENT_NUMBERING})*)"
    ))
    .expect("valid regex")
});

static NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i){DOCUMENT_NUMBERING}")).expect("valid regex"));

/// Stricter than the detector's document grammar: numbering is required
/// here, so bare "Regulation" does not produce a document specifier.
static SINGLE_DOCUMENT: LazyLock<Regex> = LazyLock::new(|| {
    let treaty = r"the\streaty(?:\s(?:[a-z]+\s){0,2}(?-i:[A-Z][a-z]*))+(?:\s\((?-i:[A-Z]{2,})\))?|(?:the\s)?(?-i:[A-Z]{2,})";
    Regex::new(&format!(
        r"(?i)^(?:(?:Commission\s)?Regulation{DOCUMENT_NUMBERING}|(?:(?:{ORDINAL}\s)?Council\s)?Directive{DOCUMENT_NUMBERING}|{treaty})"
    ))
    .expect("valid regex")
});

/// Resolves detected citations into qualifier paths.
#[derive(Debug, Default)]
pub struct ReferenceResolver {
    detector: CitationDetector,
}

impl ReferenceResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect and resolve every citation under `root`, in pre-order.
    ///
    /// Returns, per content-bearing node with at least one citation, the
    /// resolved citations of that node. Soft issues accumulate in the
    /// context's diagnostics.
    pub fn resolve_document(
        &self,
        tree: &DocumentTree,
        root: NodeId,
        ctx: &mut ResolutionContext,
    ) -> Result<Vec<(NodeId, Vec<Citation>)>> {
        let mut resolved = Vec::new();
        for id in tree.pre_order(root) {
            let mut citations = self.detector.detect(&tree[id].content);
            if citations.is_empty() {
                continue;
            }
            ctx.start_node();
            for citation in &mut citations {
                self.resolve_single(tree, id, citation, ctx)?;
            }
            resolved.push((id, citations));
        }
        Ok(resolved)
    }

    /// Resolve one citation made from `citing`, filling in its qualifier
    /// path alternatives.
    ///
    /// Citations of one node must be passed left to right; violating that
    /// is a programmer error and fails hard, because the demonstrative
    /// sub-resolvers would silently read the wrong history.
    pub fn resolve_single(
        &self,
        tree: &DocumentTree,
        citing: NodeId,
        citation: &mut Citation,
        ctx: &mut ResolutionContext,
    ) -> Result<()> {
        if let Some(previous) = ctx.last_offset {
            if citation.start < previous {
                return Err(LexrefError::CitationOrder {
                    previous,
                    found: citation.start,
                });
            }
        }
        ctx.last_offset = Some(citation.start);

        if citation.is_resolved() {
            ctx.diagnostics.push(
                DiagnosticKind::QualifierOverwritten,
                format!("overriding existing qualifier paths of '{}'", citation.text),
            );
            citation.qualifiers.clear();
        }

        let mut components: Vec<Specifier> = Vec::new();
        for fragment in citation.text.split(" of ") {
            let mut found = Vec::new();
            for rule in KEYWORD_RULES.iter() {
                found.extend(rule.extract(fragment));
            }
            found.extend(resolve_ordinal(fragment));
            found.extend(resolve_this(tree, citing, fragment));
            found.extend(resolve_that(fragment, ctx));
            found.extend(resolve_those(fragment, ctx));
            found.extend(resolve_document_name(fragment));
            for rule in TIGHT_RULES.iter() {
                found.extend(rule.extract(fragment));
            }
            // Last: "thereof" needs the fragment's own components to know
            // which depths to borrow.
            let borrowed = resolve_thereof(fragment, ctx, &found);
            found.extend(borrowed);

            if found.is_empty() {
                ctx.diagnostics.push(
                    DiagnosticKind::UnresolvedFragment,
                    format!("no component found in citation fragment '{fragment}'"),
                );
            }
            components.extend(found);
        }

        let mut paths = cartesian(&group_by_kind(components));
        for path in &mut paths {
            complete_path(tree, citing, path);
        }

        citation.qualifiers.clone_from(&paths);
        ctx.record(paths);
        Ok(())
    }

    /// Look up the tree nodes a resolved citation points at, searching
    /// from `start`. Targets are deduplicated preserving document order.
    #[must_use]
    pub fn resolve_targets(
        &self,
        tree: &DocumentTree,
        start: NodeId,
        citation: &Citation,
    ) -> Vec<NodeId> {
        let mut targets: Vec<NodeId> = Vec::new();
        for path in &citation.qualifiers {
            for id in resolve_loose(tree, start, path) {
                if !targets.contains(&id) {
                    targets.push(id);
                }
            }
        }
        targets.sort_by_key(|id| id.index());
        targets
    }
}

/// "the third <kind>".
fn resolve_ordinal(fragment: &str) -> Vec<Specifier> {
    let Some(caps) = ORDINAL_CITATION.captures(fragment) else {
        return Vec::new();
    };
    let number = ordinal_to_decimal(&caps[1]);
    match NodeKind::from_keyword(&caps[2]) {
        Some(kind) if number.is_some() => vec![Specifier::new(kind, number)],
        _ => Vec::new(),
    }
}

/// "this <kind>": the citing node's own ancestry from the nearest
/// ancestor of the named kind (the citing node included) up to the root.
fn resolve_this(tree: &DocumentTree, citing: NodeId, fragment: &str) -> Vec<Specifier> {
    let Some(caps) = THIS.captures(fragment) else {
        return Vec::new();
    };
    let Some(kind) = NodeKind::from_keyword(&caps[1]) else {
        return Vec::new();
    };

    let mut path = Vec::new();
    let mut recording = false;
    let mut current = Some(citing);
    while let Some(id) = current {
        if tree[id].kind == kind {
            recording = true;
        }
        if recording {
            path.push(Specifier::from_node(tree, id));
        }
        current = tree[id].parent;
    }
    path
}

/// "that <kind>": the suffix, from the named kind downward, of the most
/// recent prior path of this node containing that kind.
fn resolve_that(fragment: &str, ctx: &mut ResolutionContext) -> Vec<Specifier> {
    let Some(caps) = THAT.captures(fragment) else {
        return Vec::new();
    };
    let Some(kind) = NodeKind::from_keyword(&caps[1]) else {
        return Vec::new();
    };

    for group in ctx.node_groups().iter().rev() {
        for path in group.iter().rev() {
            if let Some(suffix) = suffix_from_kind(path, kind) {
                return suffix;
            }
        }
    }
    ctx.diagnostics.push(
        DiagnosticKind::MissingHistory,
        format!("'{fragment}' has no qualifying prior citation in this node"),
    );
    Vec::new()
}

/// "those <kind>s": scans the whole walk history, most recent citation
/// first, and stops at the first citation containing the kind. Its first
/// matching path contributes the full suffix; every further matching path
/// in that citation contributes only its terminal specifier, which
/// assumes all of them share one ancestor path. That assumption holds
/// within a single regulation but is a known approximation in general.
fn resolve_those(fragment: &str, ctx: &mut ResolutionContext) -> Vec<Specifier> {
    let Some(caps) = THOSE.captures(fragment) else {
        return Vec::new();
    };
    let Some(kind) = NodeKind::from_keyword(&caps[1]) else {
        return Vec::new();
    };

    for group in ctx.walk_groups().iter().rev() {
        let mut found: Vec<Specifier> = Vec::new();
        for path in group {
            let mut sorted = path.clone();
            sorted.sort_by_key(|s| Reverse(s.depth()));
            if let Some(position) = sorted.iter().position(|s| s.kind == kind) {
                if found.is_empty() {
                    found.extend_from_slice(&sorted[position..]);
                } else {
                    found.push(sorted[position].clone());
                }
            }
        }
        if !found.is_empty() {
            return found;
        }
    }
    ctx.diagnostics.push(
        DiagnosticKind::MissingHistory,
        format!("'{fragment}' has no qualifying prior citation in this walk"),
    );
    Vec::new()
}

/// Trailing "thereof": borrow every specifier shallower than this
/// fragment's shallowest component from the citing node's most recently
/// completed path.
fn resolve_thereof(
    fragment: &str,
    ctx: &mut ResolutionContext,
    current: &[Specifier],
) -> Vec<Specifier> {
    if !fragment.to_lowercase().ends_with("thereof") {
        return Vec::new();
    }

    let last = ctx
        .node_groups()
        .iter()
        .flat_map(|group| group.iter())
        .next_back()
        .cloned();
    let Some(last) = last else {
        ctx.diagnostics.push(
            DiagnosticKind::MissingHistory,
            format!("'{fragment}' used with no previous citation in this node"),
        );
        return Vec::new();
    };

    let Some(min_depth) = current.iter().map(Specifier::depth).min() else {
        ctx.diagnostics.push(
            DiagnosticKind::MissingHistory,
            format!("'{fragment}' carries no component of its own to anchor on"),
        );
        return Vec::new();
    };

    last.into_iter()
        .filter(|specifier| specifier.depth() < min_depth)
        .collect()
}

/// Document citations. Conjoined directive lists split into one document
/// specifier per numbering; any other match stores the fragment verbatim
/// as the title, unnormalized.
fn resolve_document_name(fragment: &str) -> Vec<Specifier> {
    if let Some(caps) = MULTI_DIRECTIVE.captures(fragment) {
        let list = caps.get(1).map_or("", |m| m.as_str());
        return NUMBERING
            .find_iter(list)
            .map(|numbering| {
                Specifier::new(NodeKind::Document, None)
                    .with_title(format!("Directive{}", numbering.as_str()))
            })
            .collect();
    }

    if SINGLE_DOCUMENT.is_match(fragment) {
        return vec![Specifier::new(NodeKind::Document, None).with_title(fragment)];
    }
    Vec::new()
}

/// Sort a path by descending depth and return the suffix starting at the
/// first specifier of `kind`, if any.
fn suffix_from_kind(path: &QualifierPath, kind: NodeKind) -> Option<Vec<Specifier>> {
    let mut sorted = path.clone();
    sorted.sort_by_key(|s| Reverse(s.depth()));
    let position = sorted.iter().position(|s| s.kind == kind)?;
    Some(sorted[position..].to_vec())
}

/// Group specifiers by kind, preserving first-seen order of kinds.
fn group_by_kind(components: Vec<Specifier>) -> Vec<(NodeKind, Vec<Specifier>)> {
    let mut groups: Vec<(NodeKind, Vec<Specifier>)> = Vec::new();
    for specifier in components {
        match groups.iter_mut().find(|(kind, _)| *kind == specifier.kind) {
            Some((_, members)) => members.push(specifier),
            None => groups.push((specifier.kind, vec![specifier])),
        }
    }
    groups
}

/// Cartesian product over kind-groups, one specifier per kind per path.
/// [Paragraph(1), Paragraph(2), Article(3)] becomes
/// [Paragraph(1), Article(3)] and [Paragraph(2), Article(3)].
fn cartesian(groups: &[(NodeKind, Vec<Specifier>)]) -> Vec<QualifierPath> {
    let mut paths: Vec<QualifierPath> = vec![Vec::new()];
    for (_, members) in groups {
        let mut extended = Vec::with_capacity(paths.len() * members.len());
        for path in &paths {
            for member in members {
                let mut longer = path.clone();
                longer.push(member.clone());
                extended.push(longer);
            }
        }
        paths = extended;
    }
    paths.retain(|path| !path.is_empty());
    paths
}

/// Qualify a candidate path with the citing node's ancestry: skip
/// ancestors at or below the path's shallowest depth, prepend a specifier
/// for every remaining ancestor not flagged ignore-in-qualifier, then
/// sort ascending by depth.
fn complete_path(tree: &DocumentTree, citing: NodeId, path: &mut QualifierPath) {
    let Some(min_depth) = path.iter().map(Specifier::depth).min() else {
        return;
    };

    let mut current = Some(citing);
    while let Some(id) = current {
        if tree[id].depth() < min_depth {
            break;
        }
        current = tree[id].parent;
    }
    while let Some(id) = current {
        if !tree[id].kind.ignore_in_qualifier() {
            path.push(Specifier::from_node(tree, id));
        }
        current = tree[id].parent;
    }
    path.sort_by_key(Specifier::depth);
}
