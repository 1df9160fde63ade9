use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Desktop,
    Mobile,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Desktop, Category::Mobile];

    /// Directory under the public assets root holding this category's images.
    pub fn dir(self) -> &'static str {
        match self {
            Category::Desktop => "desktop-background",
            Category::Mobile => "mobile-background",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub path: String,
    pub category: Category,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryCounts {
    pub desktop: usize,
    pub mobile: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GalleryScan {
    pub images: Vec<ImageEntry>,
}

impl GalleryScan {
    pub fn counts(&self) -> GalleryCounts {
        let mut counts = GalleryCounts::default();
        for image in &self.images {
            match image.category {
                Category::Desktop => counts.desktop += 1,
                Category::Mobile => counts.mobile += 1,
            }
        }
        counts
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn of(&self, category: Category) -> impl Iterator<Item = &ImageEntry> {
        self.images.iter().filter(move |i| i.category == category)
    }
}

/// True when the name ends in `.<ext>` for an allowed extension, including a
/// bare `.png`.
pub fn is_image(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
}

/// Lists the images directly inside `root/dir` as `/<dir>/<file>` web paths.
///
/// Best effort: a missing or unreadable directory yields nothing. Results are
/// never cached, so every call reflects the directory as it is now.
pub fn images_in<'a>(root: &Path, dir: &'a str) -> impl Iterator<Item = String> + 'a {
    let abs = root.join(dir);
    let mut names: Vec<String> = match std::fs::read_dir(&abs) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_image(name))
            .collect(),
        Err(e) => {
            tracing::debug!(dir = %abs.display(), error = %e, "image directory unavailable");
            Vec::new()
        }
    };
    names.sort_by(|a, b| collate(a, b));

    names.into_iter().map(move |name| format!("/{dir}/{name}"))
}

/// Every category's images, desktop first.
pub fn collect_gallery(root: &Path) -> Vec<ImageEntry> {
    Category::ALL
        .iter()
        .flat_map(|&category| {
            images_in(root, category.dir()).map(move |path| ImageEntry { path, category })
        })
        .collect()
}

pub fn scan(root: &Path) -> GalleryScan {
    GalleryScan {
        images: collect_gallery(root),
    }
}

// Case-folded order; on a case-only tie lowercase comes first.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").expect("write fixture");
    }

    #[test]
    fn lists_sorted_images_and_skips_other_files() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("dir");
        fs::create_dir(&dir).expect("mkdir");
        for name in ["b.png", "a.jpg", "c.txt"] {
            touch(&dir, name);
        }

        let paths: Vec<String> = images_in(root.path(), "dir").collect();
        assert_eq!(paths, vec!["/dir/a.jpg", "/dir/b.png"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let root = tempfile::tempdir().expect("tempdir");
        assert_eq!(images_in(root.path(), "nope").count(), 0);
        assert!(scan(root.path()).is_empty());
    }

    #[test]
    fn skips_subdirectories_named_like_images() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("dir");
        fs::create_dir_all(dir.join("folder.jpg")).expect("mkdir");
        touch(&dir, "real.webp");

        let paths: Vec<String> = images_in(root.path(), "dir").collect();
        assert_eq!(paths, vec!["/dir/real.webp"]);
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_image("IMG_001.JPG"));
        assert!(is_image("photo.JpEg"));
        assert!(is_image("anim.gif"));
        assert!(!is_image("notes.txt"));
        assert!(!is_image("jpg"));
        assert!(is_image(".png"));
        assert!(!is_image("archive.png.zip"));
    }

    #[test]
    fn ordering_folds_case_and_puts_lowercase_first_on_ties() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("d");
        fs::create_dir(&dir).expect("mkdir");
        for name in ["Beach.jpg", "apple.jpg", "beach.jpg", "Cake.png"] {
            touch(&dir, name);
        }

        let paths: Vec<String> = images_in(root.path(), "d").collect();
        assert_eq!(
            paths,
            vec!["/d/apple.jpg", "/d/beach.jpg", "/d/Beach.jpg", "/d/Cake.png"]
        );
    }

    #[test]
    fn gallery_lists_desktop_before_mobile_and_counts_each() {
        let root = tempfile::tempdir().expect("tempdir");
        let desktop = root.path().join(Category::Desktop.dir());
        let mobile = root.path().join(Category::Mobile.dir());
        fs::create_dir(&desktop).expect("mkdir");
        fs::create_dir(&mobile).expect("mkdir");
        touch(&desktop, "couple (2).jpg");
        touch(&desktop, "couple (1).jpg");
        touch(&mobile, "portrait.png");

        let gallery = scan(root.path());
        let paths: Vec<&str> = gallery.images.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/desktop-background/couple (1).jpg",
                "/desktop-background/couple (2).jpg",
                "/mobile-background/portrait.png",
            ]
        );
        assert_eq!(gallery.counts(), GalleryCounts { desktop: 2, mobile: 1 });
        assert_eq!(gallery.of(Category::Mobile).count(), 1);
    }

    #[test]
    fn rescans_pick_up_new_files() {
        let root = tempfile::tempdir().expect("tempdir");
        let desktop = root.path().join(Category::Desktop.dir());
        fs::create_dir(&desktop).expect("mkdir");
        assert!(collect_gallery(root.path()).is_empty());

        touch(&desktop, "new.gif");
        assert_eq!(collect_gallery(root.path()).len(), 1);
    }

    #[test]
    fn category_serializes_lowercase() {
        let entry = ImageEntry {
            path: "/mobile-background/a.jpg".into(),
            category: Category::Mobile,
        };
        let json = serde_json::to_value(&entry).expect("json");
        assert_eq!(json["category"], "mobile");
    }
}
