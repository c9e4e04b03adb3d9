#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use nabirds2voc::{Args, Split};

/// A throwaway dataset laid out like NABirds: text files under `dataset/`,
/// image files under `images/`, conversion output under `output/`.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dataset/parts")).unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        Self { dir }
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.dir.path().join("dataset")
    }

    pub fn image_root(&self) -> PathBuf {
        self.dir.path().join("images")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.dataset_dir().join(relative);
        fs::write(path, contents).unwrap();
    }

    pub fn write_image(&self, relative: &str, contents: &[u8]) {
        let path = self.image_root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn args(&self) -> Args {
        Args {
            dataset_dir: self.dataset_dir(),
            image_root: self.image_root(),
            output_dir: self.output_dir(),
            num_examples: -1,
            seed: Some(42),
            no_shuffle: false,
            split: Split::All,
        }
    }

    /// The single-image dataset from the README example
    pub fn single_image() -> Self {
        let fixture = Self::new();
        fixture.write("images.txt", "1 001.Bird/1_001.jpg\n");
        fixture.write("sizes.txt", "1 500 375\n");
        fixture.write("bounding_boxes.txt", "1 10 20 100 150\n");
        fixture.write("image_class_labels.txt", "1 001\n");
        fixture.write("classes.txt", "001 001.Bird\n");
        fixture.write("photographers.txt", "1 Jane Doe\n");
        fixture.write("hierarchy.txt", "001 000\n");
        fixture.write("train_test_split.txt", "1 1\n");
        fixture.write("parts/parts.txt", "0 bill\n1 crown\n");
        fixture.write("parts/part_locs.txt", "1 0 30 40 1\n1 1 50 60 0\n");
        fixture.write_image("001.Bird/1_001.jpg", b"jpeg-bytes-1");
        fixture
    }

    /// `count` images over two classes; odd ids are in the train split
    pub fn with_images(count: usize) -> Self {
        let fixture = Self::new();
        let mut images = String::new();
        let mut sizes = String::new();
        let mut bboxes = String::new();
        let mut labels = String::new();
        let mut photographers = String::new();
        let mut split = String::new();
        let mut part_locs = String::new();

        for id in 1..=count {
            let class = if id % 2 == 0 { "002" } else { "001" };
            let relative = format!("{}.Bird/{}_{}.jpg", class, id, class);
            images.push_str(&format!("{} {}\n", id, relative));
            sizes.push_str(&format!("{} {} {}\n", id, 400 + id, 300 + id));
            bboxes.push_str(&format!("{} {} {} {} {}\n", id, id, 2 * id, 10 + id, 20 + id));
            labels.push_str(&format!("{} {}\n", id, class));
            photographers.push_str(&format!("{} Photographer Number {}\n", id, id));
            split.push_str(&format!("{} {}\n", id, id % 2));
            part_locs.push_str(&format!("{} 3 {} {} 1\n", id, id, id));
            fixture.write_image(&relative, format!("image-{}", id).as_bytes());
        }

        fixture.write("images.txt", &images);
        fixture.write("sizes.txt", &sizes);
        fixture.write("bounding_boxes.txt", &bboxes);
        fixture.write("image_class_labels.txt", &labels);
        fixture.write("classes.txt", "001 001.Black_footed_Albatross\n002 002.Laysan_Albatross\n");
        fixture.write("photographers.txt", &photographers);
        fixture.write("hierarchy.txt", "001 100\n002 100\n");
        fixture.write("train_test_split.txt", &split);
        fixture.write("parts/parts.txt", "0 bill\n3 belly\n");
        fixture.write("parts/part_locs.txt", &part_locs);
        fixture
    }
}

/// Sorted file names in `dir`
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Text of the first `<tag>` element in `xml`
pub fn element_text<'a>(xml: &'a str, tag: &str) -> &'a str {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = xml.find(&open).unwrap() + open.len();
    let end = start + xml[start..].find(&close).unwrap();
    &xml[start..end]
}
