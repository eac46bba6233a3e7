//! The standard descriptor set.
//!
//! These are the well-known configuration values of the build tooling:
//! logging toggle, toolchain versions (with links so the target version
//! follows the source version unless overridden), workflow identity,
//! publish endpoint credentials, GPG secret key material, and test tag
//! lists. Each declares an upper-snake key for environment-style sources
//! and a dotted-lowercase key for property-style sources; the resolver
//! treats all keys uniformly.

use std::sync::{Arc, LazyLock};

use crate::descriptor::Descriptor;
use crate::environment::Environment;
use crate::errors::ResolveError;
use crate::parse;

pub static LOG_ENABLED: LazyLock<Arc<Descriptor<bool>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::boolean())
            .name("Log Enabled")
            .keys(["CONFCHAIN_LOG_ENABLED", "confchain.log.enabled"])
            .fallback(|| false)
            .description("Enable or disable confchain logging")
            .build(),
    )
});

pub static TOOLCHAIN_VERSION: LazyLock<Arc<Descriptor<u32>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::version())
            .name("Toolchain Version")
            .keys(["CONFCHAIN_TOOLCHAIN_VERSION", "confchain.toolchain.version"])
            .fallback(|| 17)
            .build(),
    )
});

pub static SOURCE_VERSION: LazyLock<Arc<Descriptor<u32>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::version())
            .name("Source Version")
            .keys(["CONFCHAIN_SOURCE_VERSION", "confchain.source.version"])
            .fallback(|| 9)
            .build(),
    )
});

pub static TARGET_VERSION: LazyLock<Arc<Descriptor<u32>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::version())
            .name("Target Version")
            .keys(["CONFCHAIN_TARGET_VERSION", "confchain.target.version"])
            .link(&SOURCE_VERSION)
            .build(),
    )
});

pub static TEST_SOURCE_VERSION: LazyLock<Arc<Descriptor<u32>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::version())
            .name("Test Source Version")
            .keys([
                "CONFCHAIN_TEST_SOURCE_VERSION",
                "confchain.test.source.version",
            ])
            .link(&SOURCE_VERSION)
            .build(),
    )
});

pub static TEST_TARGET_VERSION: LazyLock<Arc<Descriptor<u32>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::version())
            .name("Test Target Version")
            .keys([
                "CONFCHAIN_TEST_TARGET_VERSION",
                "confchain.test.target.version",
            ])
            .link(&TEST_SOURCE_VERSION)
            .build(),
    )
});

pub static WORKFLOW: LazyLock<Arc<Descriptor<String>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::string())
            .name("Project Workflow")
            .keys([
                "CONFCHAIN_WORKFLOW",
                "PROJECT_WORKFLOW",
                "confchain.workflow",
            ])
            .fallback(|| "unknown".to_string())
            .build(),
    )
});

pub static PUBLISH_URL: LazyLock<Arc<Descriptor<String>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::string())
            .name("Publish URL")
            .keys(["CONFCHAIN_PUBLISH_URL", "confchain.publish.url"])
            .fallback(|| "https://central.example.org/api/v1/publisher/upload".to_string())
            .build(),
    )
});

pub static PUBLISH_USERNAME: LazyLock<Arc<Descriptor<String>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::string())
            .name("Publish User Login Name")
            .keys([
                "CONFCHAIN_PUBLISH_USERNAME",
                "PUBLISH_USERNAME",
                "confchain.publish.username",
            ])
            .build(),
    )
});

pub static PUBLISH_PASSWORD: LazyLock<Arc<Descriptor<String>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::string())
            .name("Publish Password")
            .keys([
                "CONFCHAIN_PUBLISH_PASSWORD",
                "PUBLISH_PASSWORD",
                "confchain.publish.password",
            ])
            .build(),
    )
});

pub static GPG_SECRET_KEY: LazyLock<Arc<Descriptor<String>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::secret_key())
            .name("GPG Secret Key")
            .keys([
                "CONFCHAIN_GPG_SECRET_KEY",
                "GPG_SECRET_KEY",
                "confchain.gpg.secret.key",
            ])
            .build(),
    )
});

pub static GPG_SECRET_KEY_PASSWORD: LazyLock<Arc<Descriptor<String>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::string())
            .name("GPG Secret Key Password")
            .keys([
                "CONFCHAIN_GPG_SECRET_KEY_PASSWORD",
                "GPG_SECRET_KEY_PASSWORD",
                "confchain.gpg.secret.key.password",
            ])
            .build(),
    )
});

pub static INCLUDE_TAGS: LazyLock<Arc<Descriptor<Vec<String>>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::list())
            .name("Test Include Tags")
            .keys(["CONFCHAIN_INCLUDE_TAGS", "confchain.include.tags"])
            .fallback(Vec::new)
            .build(),
    )
});

pub static EXCLUDE_TAGS: LazyLock<Arc<Descriptor<Vec<String>>>> = LazyLock::new(|| {
    Arc::new(
        Descriptor::builder(parse::list())
            .name("Test Exclude Tags")
            .keys(["CONFCHAIN_EXCLUDE_TAGS", "confchain.exclude.tags"])
            .fallback(|| {
                ["unstable", "slow", "integration", "functional"]
                    .map(str::to_string)
                    .to_vec()
            })
            .build(),
    )
});

pub static INTEGRATION_EXCLUDE_TAGS: LazyLock<Arc<Descriptor<Vec<String>>>> =
    LazyLock::new(|| {
        Arc::new(
            Descriptor::builder(parse::list())
                .name("Integration Exclude Tags")
                .keys([
                    "CONFCHAIN_INTEGRATION_EXCLUDE_TAGS",
                    "confchain.integration.exclude.tags",
                ])
                .link(&EXCLUDE_TAGS)
                .fallback(|| ["unstable", "slow", "functional"].map(str::to_string).to_vec())
                .build(),
        )
    });

pub static FUNCTIONAL_EXCLUDE_TAGS: LazyLock<Arc<Descriptor<Vec<String>>>> =
    LazyLock::new(|| {
        Arc::new(
            Descriptor::builder(parse::list())
                .name("Functional Exclude Tags")
                .keys([
                    "CONFCHAIN_FUNCTIONAL_EXCLUDE_TAGS",
                    "confchain.functional.exclude.tags",
                ])
                .link(&EXCLUDE_TAGS)
                .fallback(|| ["unstable", "slow", "integration"].map(str::to_string).to_vec())
                .build(),
        )
    });

type ShowFn = Box<dyn Fn(&Environment) -> Result<Option<String>, ResolveError> + Send + Sync>;

/// Uniform, type-erased view of one catalog descriptor, for hosts (like the
/// CLI) that enumerate or look up values by name.
pub struct CatalogEntry {
    /// Stable short name, e.g. "toolchain.version".
    pub slug: &'static str,
    pub name: String,
    pub description: Option<String>,
    pub keys: Vec<String>,
    /// Secret material; display layers should redact the resolved value.
    pub sensitive: bool,
    show: ShowFn,
    demand: Box<dyn Fn(&Environment) -> Result<String, ResolveError> + Send + Sync>,
}

impl CatalogEntry {
    /// Resolve the underlying descriptor and render the value for display.
    pub fn resolve_display(
        &self,
        environment: &Environment,
    ) -> Result<Option<String>, ResolveError> {
        (self.show)(environment)
    }

    /// Like [`resolve_display`](Self::resolve_display), but absence is a
    /// [`ResolveError::MissingConfig`] carrying the environment's context.
    pub fn require_display(&self, environment: &Environment) -> Result<String, ResolveError> {
        (self.demand)(environment)
    }
}

fn entry<T: 'static>(
    slug: &'static str,
    descriptor: &'static LazyLock<Arc<Descriptor<T>>>,
    sensitive: bool,
    show: fn(&T) -> String,
) -> CatalogEntry {
    CatalogEntry {
        slug,
        name: descriptor.display_name().to_string(),
        description: descriptor.description().map(str::to_string),
        keys: descriptor.keys().to_vec(),
        sensitive,
        show: Box::new(move |environment| {
            Ok(environment.resolve(descriptor)?.map(|value| show(&value)))
        }),
        demand: Box::new(move |environment| Ok(show(&environment.require(descriptor)?))),
    }
}

/// All catalog entries, in catalog order.
pub fn entries() -> &'static [CatalogEntry] {
    static ENTRIES: LazyLock<Vec<CatalogEntry>> = LazyLock::new(|| {
        vec![
            entry("log.enabled", &LOG_ENABLED, false, ToString::to_string),
            entry(
                "toolchain.version",
                &TOOLCHAIN_VERSION,
                false,
                ToString::to_string,
            ),
            entry("source.version", &SOURCE_VERSION, false, ToString::to_string),
            entry("target.version", &TARGET_VERSION, false, ToString::to_string),
            entry(
                "test.source.version",
                &TEST_SOURCE_VERSION,
                false,
                ToString::to_string,
            ),
            entry(
                "test.target.version",
                &TEST_TARGET_VERSION,
                false,
                ToString::to_string,
            ),
            entry("workflow", &WORKFLOW, false, Clone::clone),
            entry("publish.url", &PUBLISH_URL, false, Clone::clone),
            entry("publish.username", &PUBLISH_USERNAME, false, Clone::clone),
            entry("publish.password", &PUBLISH_PASSWORD, true, Clone::clone),
            entry("gpg.secret.key", &GPG_SECRET_KEY, true, Clone::clone),
            entry(
                "gpg.secret.key.password",
                &GPG_SECRET_KEY_PASSWORD,
                true,
                Clone::clone,
            ),
            entry("include.tags", &INCLUDE_TAGS, false, |tags| tags.join(",")),
            entry("exclude.tags", &EXCLUDE_TAGS, false, |tags| tags.join(",")),
            entry(
                "integration.exclude.tags",
                &INTEGRATION_EXCLUDE_TAGS,
                false,
                |tags| tags.join(","),
            ),
            entry(
                "functional.exclude.tags",
                &FUNCTIONAL_EXCLUDE_TAGS,
                false,
                |tags| tags.join(","),
            ),
        ]
    });
    &ENTRIES
}

/// Find a catalog entry by slug or by any of its declared keys,
/// ASCII case-insensitive.
pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    let needle = name.trim();
    entries().iter().find(|entry| {
        entry.slug.eq_ignore_ascii_case(needle)
            || entry.keys.iter().any(|key| key.eq_ignore_ascii_case(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret;
    use crate::sources::{MapSource, SourceChain};

    fn environment_of(pairs: &[(&str, &str)]) -> Environment {
        Environment::new(
            "test",
            SourceChain::new().with_source(MapSource::new(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )),
        )
    }

    #[test]
    fn test_defaults_from_empty_chain() {
        let environment = environment_of(&[]);

        assert_eq!(environment.resolve(&LOG_ENABLED).unwrap(), Some(false));
        assert_eq!(environment.resolve(&TOOLCHAIN_VERSION).unwrap(), Some(17));
        assert_eq!(environment.resolve(&SOURCE_VERSION).unwrap(), Some(9));
        assert_eq!(environment.resolve(&WORKFLOW).unwrap(), Some("unknown".to_string()));
        assert_eq!(environment.resolve(&INCLUDE_TAGS).unwrap(), Some(vec![]));
        assert_eq!(environment.resolve(&PUBLISH_USERNAME).unwrap(), None);
    }

    #[test]
    fn test_target_version_follows_source_version() {
        // No target override anywhere: the link chain ends at the source
        // version's fallback.
        let environment = environment_of(&[]);
        assert_eq!(environment.resolve(&TARGET_VERSION).unwrap(), Some(9));

        // A source override flows through both links.
        let environment = environment_of(&[("confchain.source.version", "21")]);
        assert_eq!(environment.resolve(&TARGET_VERSION).unwrap(), Some(21));
        assert_eq!(environment.resolve(&TEST_TARGET_VERSION).unwrap(), Some(21));

        // An explicit target override wins over the link.
        let environment = environment_of(&[
            ("confchain.source.version", "21"),
            ("confchain.target.version", "17"),
        ]);
        assert_eq!(environment.resolve(&TARGET_VERSION).unwrap(), Some(17));
    }

    #[test]
    fn test_exclude_tag_links() {
        // The linked descriptor is resolved fully before the head's own
        // fallback, so the shared exclude list's fallback wins.
        let environment = environment_of(&[]);
        assert_eq!(
            environment.resolve(&INTEGRATION_EXCLUDE_TAGS).unwrap(),
            Some(
                ["unstable", "slow", "integration", "functional"]
                    .map(str::to_string)
                    .to_vec()
            )
        );

        // An explicit shared list flows into the linked descriptors.
        let environment = environment_of(&[("confchain.exclude.tags", "slow, flaky")]);
        assert_eq!(
            environment.resolve(&FUNCTIONAL_EXCLUDE_TAGS).unwrap(),
            Some(vec!["slow".to_string(), "flaky".to_string()])
        );
    }

    #[test]
    fn test_secret_key_resolution() {
        let wrapped = secret::encode("Hello World!");
        let environment = environment_of(&[("GPG_SECRET_KEY", wrapped.as_str())]);
        assert_eq!(
            environment.resolve(&GPG_SECRET_KEY).unwrap(),
            Some("Hello World!".to_string())
        );

        let environment = environment_of(&[("GPG_SECRET_KEY", "-----BEGIN PGP KEY-----")]);
        assert_eq!(
            environment.resolve(&GPG_SECRET_KEY).unwrap(),
            Some("-----BEGIN PGP KEY-----".to_string())
        );

        let environment = environment_of(&[("GPG_SECRET_KEY", "Hello World!")]);
        assert!(environment.resolve(&GPG_SECRET_KEY).is_err());

        let environment = environment_of(&[("GPG_SECRET_KEY", "")]);
        assert_eq!(environment.resolve(&GPG_SECRET_KEY).unwrap(), None);
    }

    #[test]
    fn test_registry_covers_every_descriptor() {
        let slugs: Vec<_> = entries().iter().map(|entry| entry.slug).collect();
        assert_eq!(slugs.len(), 16);
        assert!(slugs.contains(&"gpg.secret.key"));

        // Slugs are unique.
        let mut deduped = slugs.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), slugs.len());
    }

    #[test]
    fn test_find_by_slug_and_key() {
        assert!(find("toolchain.version").is_some());
        assert!(find("CONFCHAIN_TOOLCHAIN_VERSION").is_some());
        assert!(find("Toolchain_Version").is_none());
        assert!(find("confchain.TOOLCHAIN.version").is_some());
        assert!(find("no.such.entry").is_none());
    }

    #[test]
    fn test_sensitive_entries_are_flagged() {
        for slug in ["publish.password", "gpg.secret.key", "gpg.secret.key.password"] {
            assert!(find(slug).unwrap().sensitive, "{slug} should be sensitive");
        }
        assert!(!find("workflow").unwrap().sensitive);
    }

    #[test]
    fn test_resolve_display_renders_values() {
        let environment = environment_of(&[]);
        let rendered = find("exclude.tags")
            .unwrap()
            .resolve_display(&environment)
            .unwrap();
        assert_eq!(rendered, Some("unstable,slow,integration,functional".to_string()));

        let rendered = find("publish.username")
            .unwrap()
            .resolve_display(&environment)
            .unwrap();
        assert_eq!(rendered, None);
    }

    #[test]
    fn test_require_display_reports_missing() {
        let environment = environment_of(&[]);
        let error = find("publish.password")
            .unwrap()
            .require_display(&environment)
            .unwrap_err();
        assert!(matches!(error, ResolveError::MissingConfig { .. }));
        assert!(error.to_string().contains("test"));
    }
}
