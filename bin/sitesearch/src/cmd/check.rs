//! Check command - validate configuration and content

use std::{collections::HashSet, path::Path};

use color_eyre::eyre::{Result, bail};
use sitesearch_core::{Config, ContentEntry, SourceKind, StatusCounts};
use sitesearch_index::{ContentStore, FsContentStore, PathResolver, RouteResolver};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and every entry of the three collections.
pub async fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        println!("\nChecking content collections...");
        check_collections(cfg, &mut result).await;
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

async fn check_collections(config: &Config, result: &mut ValidationResult) {
    let store = FsContentStore::new(config.content.clone());
    let resolver = RouteResolver::new(config.routes.clone());

    for kind in SourceKind::ALL {
        let dir = store.collection_dir(kind);
        if !dir.is_dir() {
            result.add_warning(format!(
                "{kind} directory does not exist: {}",
                dir.display()
            ));
            continue;
        }

        match store.entries(kind).await {
            Ok(entries) => {
                let counts = StatusCounts::tally(&entries);
                println!(
                    "  ✓ {kind}: {} entries ({} published, {} draft, {} archived)",
                    counts.total(),
                    counts.published,
                    counts.draft,
                    counts.archived
                );
                validate_entries(kind, &entries, &resolver, result);
            }
            Err(e) => {
                println!("  ✗ {kind}: {e}");
                result.add_error(e.to_string());
            }
        }
    }
}

fn validate_entries(
    kind: SourceKind,
    entries: &[ContentEntry],
    resolver: &dyn PathResolver,
    result: &mut ValidationResult,
) {
    let mut seen = HashSet::new();

    for entry in entries {
        let slug = entry.slug();
        if !seen.insert(slug) {
            result.add_error(format!("{kind}/{slug}: duplicate slug"));
        }

        for field in entry.empty_required_fields() {
            result.add_warning(format!("{kind}/{slug}: empty {field}"));
        }

        // Unpublished entries never reach the index, so their routes don't matter.
        if entry.is_published()
            && let Err(e) = resolver.resolve(kind, slug)
        {
            result.add_warning(format!("{kind}/{slug}: {e}; the fallback URL will be used"));
        }
    }
}

#[cfg(test)]
mod tests {
    use sitesearch_core::{DocFrontmatter, Entry, PostStatus, ToolArticleFrontmatter};

    use super::*;

    fn doc(slug: &str, description: &str) -> ContentEntry {
        ContentEntry::Docs(Entry::new(
            slug,
            DocFrontmatter {
                title: slug.to_string(),
                description: description.to_string(),
                published_date: "2024-01-01".to_string(),
                ..Default::default()
            },
            "",
        ))
    }

    fn tool_article(slug: &str, status: PostStatus) -> ContentEntry {
        ContentEntry::ToolArticle(Entry::new(
            slug,
            ToolArticleFrontmatter {
                title: "Mining".to_string(),
                description: "Cards".to_string(),
                published_date: "2024-01-01".to_string(),
                status,
                ..Default::default()
            },
            "",
        ))
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::default();
        assert!(!result.has_errors());
        assert!(!result.has_warnings());

        result.add_error("bad");
        result.add_warning("meh");
        assert!(result.has_errors());
        assert!(result.has_warnings());
    }

    #[test]
    fn test_duplicate_slugs_and_empty_fields() {
        let entries = vec![doc("intro", "Hi"), doc("intro", "")];
        let mut result = ValidationResult::default();

        validate_entries(SourceKind::Docs, &entries, &RouteResolver::default(), &mut result);

        assert_eq!(result.errors, vec!["docs/intro: duplicate slug"]);
        assert_eq!(result.warnings, vec!["docs/intro: empty description"]);
    }

    #[test]
    fn test_unroutable_tool_article_warns_when_published() {
        let entries = vec![
            tool_article("loose", PostStatus::Published),
            tool_article("draft-loose", PostStatus::Draft),
            tool_article("anki/mining", PostStatus::Published),
        ];
        let mut result = ValidationResult::default();

        validate_entries(
            SourceKind::ToolArticles,
            &entries,
            &RouteResolver::default(),
            &mut result,
        );

        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("tool-articles/loose:"));
    }
}
