use log::{trace, warn};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::model::ImageRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCategory {
    pub name: String,
    pub images: Vec<ImageRef>,
}

impl ImageCategory {
    pub fn new(name: &str, images: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            images: images.iter().map(|image| Rc::from(*image)).collect(),
        }
    }
}

/// Card faces available to the board generator, grouped by category folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCatalog {
    pub categories: Vec<ImageCategory>,
}

impl ImageCatalog {
    pub fn new(categories: Vec<ImageCategory>) -> Self {
        Self { categories }
    }

    /// Reads `<assets_dir>/<category>/*.png`. Loose files in `assets_dir` are ignored and
    /// a missing `assets_dir` gives an empty catalog.
    pub fn scan(assets_dir: &Path) -> std::io::Result<Self> {
        if !assets_dir.is_dir() {
            warn!(target: "board_generator", "Image directory {:?} not found", assets_dir);
            return Ok(Self::default());
        }

        let mut category_dirs = Vec::new();
        for entry in fs::read_dir(assets_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                category_dirs.push(entry.path());
            }
        }
        category_dirs.sort();

        let mut categories = Vec::new();
        for dir in category_dirs {
            let name = dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut images: Vec<String> = Vec::new();
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let is_png = path
                    .file_name()
                    .map(|file| file.to_string_lossy().contains(".png"))
                    .unwrap_or(false);
                if is_png && path.is_file() {
                    images.push(path.to_string_lossy().into_owned());
                }
            }
            images.sort();

            if images.is_empty() {
                warn!(target: "board_generator", "Category {} has no images", name);
            }
            trace!(target: "board_generator", "Category {}: {} images", name, images.len());
            categories.push(ImageCategory {
                name,
                images: images.into_iter().map(ImageRef::from).collect(),
            });
        }

        Ok(Self { categories })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|category| category.images.is_empty())
    }

    pub fn image_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.images.len())
            .sum()
    }
}
