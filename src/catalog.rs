//! Food sprites. The engine only asks the catalog whether the next food is
//! long; which picture goes with it is the renderer's business.

use crate::settings::Rgb;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::fs;
use std::io;
use std::path::Path;

/// Marker in a sprite file name for a two-cell wide picture, e.g. `bread_2.png`.
const LONG_MARKER: &str = "_2.";

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Fallback food colours used when no sprites are available.
const DEFAULT_COLORS: [Rgb; 5] = [
    Rgb::new(0xff, 0x6b, 0x6b),
    Rgb::new(0x4e, 0xcd, 0xc4),
    Rgb::new(0xf9, 0xca, 0x24),
    Rgb::new(0xff, 0x9f, 0x43),
    Rgb::new(0x6c, 0x5c, 0xe7),
];

#[derive(Clone, Debug, PartialEq)]
pub struct FoodDescriptor {
    pub is_long: bool,
    pub sprite: Option<String>,
    pub color: Option<Rgb>,
}

impl FoodDescriptor {
    pub fn from_sprite_name(name: &str) -> Self {
        FoodDescriptor {
            is_long: name.contains(LONG_MARKER),
            sprite: Some(name.to_string()),
            color: None,
        }
    }
}

/// Source of food looks, queried once per placement attempt.
pub trait FoodCatalog {
    /// A random descriptor, or `None` when the catalog has nothing to offer.
    /// `None` places a plain one-cell food.
    fn pick(&self, rng: &mut dyn RngCore) -> Option<FoodDescriptor>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpriteCatalog {
    entries: Vec<FoodDescriptor>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SpriteCatalog {
            entries: names
                .into_iter()
                .map(|name| FoodDescriptor::from_sprite_name(name.as_ref()))
                .collect(),
        }
    }

    /// Five plain coloured foods, all one cell wide.
    pub fn default_foods() -> Self {
        SpriteCatalog {
            entries: DEFAULT_COLORS
                .iter()
                .map(|&color| FoodDescriptor {
                    is_long: false,
                    sprite: None,
                    color: Some(color),
                })
                .collect(),
        }
    }

    /// Registers every image file in `dir` by name. Files are not decoded.
    pub fn from_dir(dir: &Path) -> io::Result<Self> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if !is_image {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                debug!("Found food sprite {}", name);
                names.push(name.to_string());
            }
        }
        names.sort();

        let catalog = Self::from_names(names);
        info!(
            "Loaded {} food sprites ({} long) from {}",
            catalog.len(),
            catalog.long_count(),
            dir.display()
        );
        Ok(catalog)
    }

    pub fn push(&mut self, descriptor: FoodDescriptor) {
        self.entries.push(descriptor);
    }

    pub fn entries(&self) -> &[FoodDescriptor] {
        &self.entries
    }

    pub fn long_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_long).count()
    }
}

impl FoodCatalog for SpriteCatalog {
    fn pick(&self, rng: &mut dyn RngCore) -> Option<FoodDescriptor> {
        self.entries.choose(rng).cloned()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
