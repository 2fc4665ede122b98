//! Pattern catalog: the declarative table of recognized command shapes.
//!
//! A catalog is an ordered list of contexts, each holding an ordered list of
//! patterns. Declaration order is significant: the resolver scans in this
//! order and the first-declared pattern wins confidence ties.
//!
//! Catalogs are built once (from TOML or an API definition) and are
//! read-only afterwards. An unparsable matching rule is reported when the
//! catalog is built, never when a command is resolved.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize, Serializer};

use ii_protocol::{Action, ApiDescriptor};

use crate::error::{CatalogError, CatalogResult};

const BUILTIN_TOML: &str = include_str!("contexts.toml");

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_toml_str(BUILTIN_TOML).expect("built-in catalog must compile")
});

// ── Declarative specs (as written in TOML) ────────────────────

/// Top-level shape of a catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSpec {
    pub contexts: Vec<ContextSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub patterns: Vec<PatternSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternSpec {
    pub intent: String,
    pub action: Action,
    /// Matching rule (regex syntax, applied case-insensitively).
    pub rule: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    pub api: ApiDescriptor,
}

// ── Compiled catalog ──────────────────────────────────────────

/// One recognizable command shape.
///
/// Capture group `i + 1` of the rule feeds `parameters[i]`. Groups beyond the
/// parameter list are ignored; names beyond the available groups are never
/// populated.
#[derive(Debug, Clone, Serialize)]
pub struct Pattern {
    #[serde(rename = "pattern", serialize_with = "serialize_rule")]
    regex: Regex,
    pub intent: String,
    /// Id of the owning context.
    pub context: String,
    pub action: Action,
    pub parameters: Vec<String>,
    /// Phrasings used for suggestions only, never for matching.
    pub examples: Vec<String>,
    pub api: ApiDescriptor,
}

fn serialize_rule<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}

impl Pattern {
    /// Compile a pattern spec for the context `context_id`.
    pub fn compile(spec: PatternSpec, context_id: &str) -> CatalogResult<Self> {
        let regex = RegexBuilder::new(&spec.rule)
            .case_insensitive(true)
            .build()
            .map_err(|e| CatalogError::Regex {
                intent: spec.intent.clone(),
                message: e.to_string(),
            })?;

        let groups = regex.captures_len() - 1;
        if spec.parameters.len() > groups {
            tracing::warn!(
                intent = %spec.intent,
                context = %context_id,
                parameters = spec.parameters.len(),
                groups,
                "pattern declares more parameters than capture groups"
            );
        }

        Ok(Self {
            regex,
            intent: spec.intent,
            context: context_id.to_string(),
            action: spec.action,
            parameters: spec.parameters,
            examples: spec.examples,
            api: spec.api,
        })
    }

    /// The matching rule as written.
    pub fn rule(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(text)
    }

    /// Whether `name` is one of the declared parameter names.
    pub fn expects(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p == name)
    }
}

/// A named grouping of related patterns.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub patterns: Vec<Pattern>,
}

impl Context {
    pub fn compile(spec: ContextSpec) -> CatalogResult<Self> {
        let patterns = spec
            .patterns
            .into_iter()
            .map(|p| Pattern::compile(p, &spec.id))
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Self {
            id: spec.id,
            name: spec.name,
            description: spec.description,
            color: spec.color,
            icon: spec.icon,
            patterns,
        })
    }
}

/// The full, ordered, read-only set of contexts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    contexts: Vec<Context>,
}

impl Catalog {
    /// The catalog shipped with the engine, compiled on first use.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a catalog from compiled contexts. Context ids must be unique.
    pub fn from_contexts(contexts: Vec<Context>) -> CatalogResult<Self> {
        for (i, context) in contexts.iter().enumerate() {
            if contexts[..i].iter().any(|c| c.id == context.id) {
                return Err(CatalogError::DuplicateContext(context.id.clone()));
            }
        }
        Ok(Self { contexts })
    }

    pub fn from_spec(spec: CatalogSpec) -> CatalogResult<Self> {
        let contexts = spec
            .contexts
            .into_iter()
            .map(Context::compile)
            .collect::<CatalogResult<Vec<_>>>()?;
        Self::from_contexts(contexts)
    }

    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        let spec: CatalogSpec =
            toml::from_str(contents).map_err(|e| CatalogError::Format(e.to_string()))?;
        Self::from_spec(spec)
    }

    /// Load a catalog from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Fold extra contexts into this catalog.
    ///
    /// Patterns of a context whose id already exists are appended to it;
    /// contexts with new ids are appended at the end. Existing order is kept.
    pub fn merged(mut self, extra: Vec<Context>) -> Self {
        for context in extra {
            match self.contexts.iter_mut().find(|c| c.id == context.id) {
                Some(existing) => existing.patterns.extend(context.patterns),
                None => self.contexts.push(context),
            }
        }
        self
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn context(&self, id: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.id == id)
    }

    /// Every pattern, contexts and patterns both in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.contexts.iter().flat_map(|c| c.patterns.iter())
    }

    pub fn pattern_count(&self) -> usize {
        self.contexts.iter().map(|c| c.patterns.len()).sum()
    }
}
