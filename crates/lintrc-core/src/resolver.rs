//! Fallback plugin resolution.
//!
//! The host's module loader stays authoritative: the resolver defers to it
//! first and never overrides a successful lookup. Only when the host finds
//! nothing, and only for names on the configured allow-list, does the
//! resolver probe the alternate roots — in configured order, since an
//! earlier root is expected to shadow a later one — and finally the shared
//! nested-dependency root. Everything here is a read-only filesystem probe;
//! no caching, no mutation of host state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::model::Configuration;

/// The host's default module lookup, consumed as a black box.
pub trait ModuleLocator {
    /// Returns the location of `name`, or `None` if the host cannot find it.
    fn locate(&self, name: &str, search_paths: &[PathBuf], is_entry: bool) -> Option<PathBuf>;
}

/// A locator that probes each search path for an entry named `name`.
///
/// Stands in for the host loader when the host is this tool itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryLocator;

impl ModuleLocator for DirectoryLocator {
    fn locate(&self, name: &str, search_paths: &[PathBuf], _is_entry: bool) -> Option<PathBuf> {
        search_paths.iter().find_map(|root| probe(root, name))
    }
}

/// Which stage of the search produced a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// The host's default lookup succeeded; the resolver added nothing.
    Host,
    /// Found under one of the name's configured fallback roots.
    Fallback(PathBuf),
    /// Found under the shared nested-dependency root.
    Nested,
}

/// A successful plugin resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Concrete location of the plugin.
    pub location: PathBuf,
    /// Which search stage found it.
    pub provenance: Provenance,
}

/// Resolution failure; policy is the caller's.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Neither the host nor any applicable fallback root has the module.
    #[error("module `{name}` not found")]
    NotFound {
        /// The requested module name.
        name: String,
    },
}

/// Capability-scoped fallback resolver.
///
/// Holds the allow-list (name → ordered alternate roots) and the optional
/// shared nested root; thread it through plugin-loading calls instead of
/// patching any global lookup function.
#[derive(Debug, Clone)]
pub struct PluginResolver<L> {
    locator: L,
    fallbacks: BTreeMap<String, Vec<PathBuf>>,
    nested_root: Option<PathBuf>,
}

impl<L: ModuleLocator> PluginResolver<L> {
    /// Creates a resolver from an explicit fallback table.
    #[must_use]
    pub fn new(
        locator: L,
        fallbacks: BTreeMap<String, Vec<PathBuf>>,
        nested_root: Option<PathBuf>,
    ) -> Self {
        Self {
            locator,
            fallbacks,
            nested_root,
        }
    }

    /// Creates a resolver from a loaded configuration's fallback table.
    #[must_use]
    pub fn from_config(locator: L, config: &Configuration) -> Self {
        Self::new(
            locator,
            config.fallbacks().clone(),
            config.nested_root().map(Path::to_path_buf),
        )
    }

    /// Returns `true` if a name is on the fallback allow-list.
    #[must_use]
    pub fn is_allow_listed(&self, name: &str) -> bool {
        self.fallbacks.contains_key(name)
    }

    /// Resolves a module name.
    ///
    /// The host lookup runs first and wins outright if it succeeds. Names
    /// off the allow-list get no fallback treatment: their failure
    /// propagates unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] when every applicable stage
    /// comes up empty.
    pub fn resolve(
        &self,
        name: &str,
        search_paths: &[PathBuf],
        is_entry: bool,
    ) -> Result<Resolution, ResolveError> {
        if let Some(location) = self.locator.locate(name, search_paths, is_entry) {
            return Ok(Resolution {
                location,
                provenance: Provenance::Host,
            });
        }

        let Some(roots) = self.fallbacks.get(name) else {
            return Err(ResolveError::NotFound {
                name: name.to_string(),
            });
        };

        for root in roots {
            if let Some(location) = probe(root, name) {
                tracing::debug!("resolved `{name}` via fallback root {}", root.display());
                return Ok(Resolution {
                    location,
                    provenance: Provenance::Fallback(root.clone()),
                });
            }
        }

        if let Some(nested) = &self.nested_root {
            if let Some(location) = probe(nested, name) {
                tracing::debug!("resolved `{name}` via nested root {}", nested.display());
                return Ok(Resolution {
                    location,
                    provenance: Provenance::Nested,
                });
            }
        }

        Err(ResolveError::NotFound {
            name: name.to_string(),
        })
    }
}

fn probe(root: &Path, name: &str) -> Option<PathBuf> {
    let candidate = root.join(name);
    candidate.exists().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A host locator with a fixed answer, for exercising precedence.
    struct FixedLocator(Option<PathBuf>);

    impl ModuleLocator for FixedLocator {
        fn locate(&self, _: &str, _: &[PathBuf], _: bool) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    fn table(name: &str, roots: &[&Path]) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::from([(
            name.to_string(),
            roots.iter().map(|r| r.to_path_buf()).collect(),
        )])
    }

    #[test]
    fn host_success_is_never_overridden() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("markdown")).unwrap();

        let host_answer = PathBuf::from("/host/markdown");
        let resolver = PluginResolver::new(
            FixedLocator(Some(host_answer.clone())),
            table("markdown", &[tmp.path()]),
            None,
        );

        let resolution = resolver.resolve("markdown", &[], false).unwrap();
        assert_eq!(resolution.location, host_answer);
        assert_eq!(resolution.provenance, Provenance::Host);
    }

    #[test]
    fn fallback_roots_probed_in_order() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let c = TempDir::new().unwrap();
        // The plugin exists only under B and C.
        fs::create_dir(b.path().join("local-rules")).unwrap();
        fs::create_dir(c.path().join("local-rules")).unwrap();

        let resolver = PluginResolver::new(
            FixedLocator(None),
            table("local-rules", &[a.path(), b.path(), c.path()]),
            None,
        );

        let resolution = resolver.resolve("local-rules", &[], false).unwrap();
        assert_eq!(resolution.location, b.path().join("local-rules"));
        assert_eq!(resolution.provenance, Provenance::Fallback(b.path().to_path_buf()));
    }

    #[test]
    fn nested_root_is_last_resort() {
        let empty = TempDir::new().unwrap();
        let nested = TempDir::new().unwrap();
        fs::create_dir(nested.path().join("relaxed-parser")).unwrap();

        let resolver = PluginResolver::new(
            FixedLocator(None),
            table("relaxed-parser", &[empty.path()]),
            Some(nested.path().to_path_buf()),
        );

        let resolution = resolver.resolve("relaxed-parser", &[], false).unwrap();
        assert_eq!(resolution.provenance, Provenance::Nested);
        assert_eq!(resolution.location, nested.path().join("relaxed-parser"));
    }

    #[test]
    fn fallback_root_shadows_nested_root() {
        let root = TempDir::new().unwrap();
        let nested = TempDir::new().unwrap();
        fs::create_dir(root.path().join("markdown")).unwrap();
        fs::create_dir(nested.path().join("markdown")).unwrap();

        let resolver = PluginResolver::new(
            FixedLocator(None),
            table("markdown", &[root.path()]),
            Some(nested.path().to_path_buf()),
        );

        let resolution = resolver.resolve("markdown", &[], false).unwrap();
        assert_eq!(
            resolution.provenance,
            Provenance::Fallback(root.path().to_path_buf())
        );
    }

    #[test]
    fn names_off_the_allow_list_get_no_fallback() {
        let root = TempDir::new().unwrap();
        // The module even exists under the root; it must still not be found.
        fs::create_dir(root.path().join("unlisted")).unwrap();

        let resolver = PluginResolver::new(
            FixedLocator(None),
            table("markdown", &[root.path()]),
            Some(root.path().to_path_buf()),
        );

        // Allow-listed name resolves...
        assert!(resolver.is_allow_listed("markdown"));
        // ...but the unlisted one fails even though a probe would succeed.
        assert!(!resolver.is_allow_listed("unlisted"));
        let err = resolver.resolve("unlisted", &[], false).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { name } if name == "unlisted"));
    }

    #[test]
    fn not_found_when_every_stage_fails() {
        let empty = TempDir::new().unwrap();
        let resolver = PluginResolver::new(
            FixedLocator(None),
            table("markdown", &[empty.path()]),
            None,
        );

        assert!(resolver.resolve("markdown", &[], false).is_err());
    }

    #[test]
    fn resolve_is_idempotent() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("markdown")).unwrap();

        let resolver = PluginResolver::new(
            FixedLocator(None),
            table("markdown", &[root.path()]),
            None,
        );

        let first = resolver.resolve("markdown", &[], false).unwrap();
        let second = resolver.resolve("markdown", &[], false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn directory_locator_probes_search_paths() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::create_dir(b.path().join("markdown")).unwrap();

        let paths = vec![a.path().to_path_buf(), b.path().to_path_buf()];
        let found = DirectoryLocator.locate("markdown", &paths, false);
        assert_eq!(found, Some(b.path().join("markdown")));
        assert_eq!(DirectoryLocator.locate("missing", &paths, false), None);
    }
}
