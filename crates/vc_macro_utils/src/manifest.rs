use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a workspace crate as seen from the
/// caller's Cargo.toml.
///
/// Derive macros emit absolute paths, and the caller may depend on `vc_rtti`
/// directly or only through the `voidcraft_rtti` umbrella crate.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_rtti"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the name begins with `vc_` and the caller depends on one of the umbrella
///    crates (`voidcraft_rtti`, `voidcraft`, `vc`), return `::umbrella::short_name`
///    (e.g. `vc_rtti` -> `::voidcraft_rtti::rtti`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, including when the manifest cannot be read, fall back to `::crate_name`.
///
/// ## Note
///
/// A crate expanding its own derives should add `extern crate self as crate_name;`
/// so the absolute path also works inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Option<Document<Box<str>>>,
    pub modified_time: Option<SystemTime>,
}

const UMBRELLA_NAMES: [&str; 3] = ["voidcraft_rtti", "voidcraft", "vc"];
const ENGINE_PREFIX: &str = "vc_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
    }

    #[inline(never)]
    fn read(path: &Path) -> Option<Document<Box<str>>> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(text).ok()
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments.push(syn::PathSegment::from(syn::Ident::new(
                segment,
                Span::call_site(),
            )));
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(ENGINE_PREFIX)?;
        UMBRELLA_NAMES
            .into_iter()
            .find(|umbrella| deps.contains_key(umbrella))
            .map(|umbrella| Self::absolute(&[umbrella, module]))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(&[name]);
        };

        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|table| match manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Manifests are cached per path and re-read when the file changes, but the
    /// lookup still takes a global lock: call it once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Manifest {
                manifest: None,
                modified_time: None,
            });
        };
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
            && modified_time.is_some()
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn to_string(path: &syn::Path) -> String {
        let names: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        format!("::{}", names.join("::"))
    }

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: toml_edit::Document::parse(Box::<str>::from(text)).ok(),
            modified_time: None,
        }
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nvc_rtti = { path = \"../vc_rtti\" }\n");
        assert_eq!(to_string(&m.get_crate_path("vc_rtti")), "::vc_rtti");
    }

    #[test]
    fn umbrella_dependency() {
        let m = manifest("[dev-dependencies]\nvoidcraft_rtti = \"0.0.1\"\n");
        assert_eq!(
            to_string(&m.get_crate_path("vc_rtti")),
            "::voidcraft_rtti::rtti"
        );
    }

    #[test]
    fn fallback() {
        let m = manifest("[dependencies]\nserde = \"1\"\n");
        assert_eq!(to_string(&m.get_crate_path("vc_rtti")), "::vc_rtti");
    }
}
