//! Project and target descriptions.
//!
//! A [`Project`] is the resolved, in-memory form of one manifest: a location
//! on disk plus an ordered list of [`Target`]s whose names are unique within
//! the project. [`Product`] classifies what a target produces and drives the
//! query engine's classification predicates (static linkage, test bundles,
//! resource hosting).
//!
//! Projects are loaded at most once per location during a graph build; the
//! loader's cache hands back the already-loaded instance on every subsequent
//! reference to the same path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The product a target builds into.
///
/// Serialized in manifests as snake_case strings (`"app"`, `"static_library"`,
/// `"unit_tests"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// An application bundle.
    App,
    /// A lightweight app clip.
    AppClip,
    /// An application extension.
    AppExtension,
    /// A sticker-pack extension.
    StickerPackExtension,
    /// A watch application extension.
    WatchExtension,
    /// A messages extension.
    MessagesExtension,
    /// A unit-test bundle.
    UnitTests,
    /// A UI-test bundle.
    UiTests,
    /// A resource bundle.
    Bundle,
    /// A statically linked library.
    StaticLibrary,
    /// A dynamically linked library.
    DynamicLibrary,
    /// A dynamically linked framework.
    Framework,
    /// A statically linked framework.
    StaticFramework,
}

impl Product {
    /// Whether this product is linked statically into its consumers.
    pub fn is_static(self) -> bool {
        matches!(self, Product::StaticLibrary | Product::StaticFramework)
    }

    /// Whether this product is a test bundle (unit or UI tests).
    pub fn is_tests_bundle(self) -> bool {
        matches!(self, Product::UnitTests | Product::UiTests)
    }

    /// Whether a target with this product can host resources itself.
    ///
    /// Libraries cannot carry resources; everything else (apps, bundles,
    /// frameworks, extensions, test bundles) can.
    pub fn supports_resources(self) -> bool {
        !matches!(self, Product::StaticLibrary | Product::DynamicLibrary)
    }

    /// The filename extension of the built product, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Product::App | Product::AppClip => "app",
            Product::AppExtension
            | Product::StickerPackExtension
            | Product::WatchExtension
            | Product::MessagesExtension => "appex",
            Product::UnitTests | Product::UiTests => "xctest",
            Product::Bundle => "bundle",
            Product::StaticLibrary => "a",
            Product::DynamicLibrary => "dylib",
            Product::Framework | Product::StaticFramework => "framework",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Product::App => "app",
            Product::AppClip => "app_clip",
            Product::AppExtension => "app_extension",
            Product::StickerPackExtension => "sticker_pack_extension",
            Product::WatchExtension => "watch_extension",
            Product::MessagesExtension => "messages_extension",
            Product::UnitTests => "unit_tests",
            Product::UiTests => "ui_tests",
            Product::Bundle => "bundle",
            Product::StaticLibrary => "static_library",
            Product::DynamicLibrary => "dynamic_library",
            Product::Framework => "framework",
            Product::StaticFramework => "static_framework",
        };
        write!(f, "{name}")
    }
}

/// A buildable target declared by a project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Target name, unique within its project.
    pub name: String,
    /// What this target builds.
    pub product: Product,
}

impl Target {
    /// Create a target description.
    pub fn new(name: impl Into<String>, product: Product) -> Self {
        Self {
            name: name.into(),
            product,
        }
    }

    /// Whether this target can host resources (delegates to its product).
    pub fn supports_resources(&self) -> bool {
        self.product.supports_resources()
    }

    /// The decorated filename of the built product.
    ///
    /// Libraries follow the `lib<name>.<ext>` convention; everything else is
    /// `<name>.<ext>`.
    pub fn product_name(&self) -> String {
        match self.product {
            Product::StaticLibrary | Product::DynamicLibrary => {
                format!("lib{}.{}", self.name, self.product.extension())
            }
            _ => format!("{}.{}", self.name, self.product.extension()),
        }
    }
}

/// A project: one manifest location and the targets it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory that contains the project's manifest.
    pub path: PathBuf,
    /// Project name.
    pub name: String,
    /// Declared targets, in manifest order. Names are unique (validated at
    /// load time).
    pub targets: Vec<Target>,
}

impl Project {
    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }
}

impl std::hash::Hash for Project {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Identity is the manifest location; targets hash through it.
        self.path.hash(state);
    }
}
