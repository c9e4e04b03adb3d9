use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::path::Path;

use crate::config::{Args, Split};
use crate::conversion::process_image;
use crate::error::Result;
use crate::types::{ConversionStats, Dataset, OutputDirs};
use crate::utils::{create_progress_bar, ensure_output_directory};

pub const ANNOTATIONS_DIR: &str = "Annotations";
pub const IMAGES_DIR: &str = "VOCImages";

/// Set up the directory structure for VOC output
pub fn setup_output_directories(output_dir: &Path) -> Result<OutputDirs> {
    let annotations_dir = ensure_output_directory(&output_dir.join(ANNOTATIONS_DIR))?;
    let images_dir = ensure_output_directory(&output_dir.join(IMAGES_DIR))?;

    Ok(OutputDirs {
        annotations_dir,
        images_dir,
    })
}

/// Image ids from images.txt in processing order.
///
/// Ids are sorted first so that a given seed always produces the same order;
/// without a seed the generator is seeded from entropy.
pub fn order_image_ids<'a>(dataset: &'a Dataset, args: &Args) -> Vec<&'a str> {
    let mut image_ids: Vec<&str> = dataset.image_paths.keys().map(String::as_str).collect();
    image_ids.sort_unstable();

    if !args.no_shuffle {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        image_ids.shuffle(&mut rng);
    }

    image_ids
}

/// Ids belonging to the selected split, or `None` when every image qualifies
fn split_filter(dataset: &Dataset, split: Split) -> Option<HashSet<&str>> {
    let ids = match split {
        Split::All => return None,
        Split::Train => &dataset.split.train,
        Split::Test => &dataset.split.test,
    };
    Some(ids.iter().map(String::as_str).collect())
}

/// Ordered image ids restricted to the selected split
pub fn select_image_ids<'a>(dataset: &'a Dataset, args: &Args) -> Vec<&'a str> {
    let image_ids = order_image_ids(dataset, args);
    match split_filter(dataset, args.split) {
        Some(allowed) => image_ids
            .into_iter()
            .filter(|image_id| allowed.contains(image_id))
            .collect(),
        None => image_ids,
    }
}

/// Convert images in order until the example cap is reached or ids run out
pub fn process_dataset(
    dataset: &Dataset,
    output_dirs: &OutputDirs,
    args: &Args,
) -> Result<ConversionStats> {
    let image_ids = select_image_ids(dataset, args);
    let limit = args.example_limit();

    let mut stats = ConversionStats::new();
    stats.images_considered = dataset.image_paths.len();
    stats.skipped_by_split = dataset.image_paths.len() - image_ids.len();

    let expected = limit.map_or(image_ids.len(), |limit| limit.min(image_ids.len()));
    let pb = create_progress_bar(expected as u64, "Convert");

    for (index, image_id) in image_ids.into_iter().take(expected).enumerate() {
        let (_, annotation) = process_image(dataset, image_id, index + 1, output_dirs)?;
        stats.increment_copied();
        stats.increment_written();

        pb.suspend(|| println!("{}", annotation.object.name));
        pb.inc(1);
    }

    pb.finish_with_message("Conversion complete");
    Ok(stats)
}

/// Main conversion pipeline: load the tables, prepare the output and convert
pub fn convert(args: &Args) -> Result<ConversionStats> {
    info!("Loading annotation files from {:?}...", args.dataset_dir);
    let dataset = Dataset::load(&args.dataset_dir, &args.image_root)?;

    let output_dirs = setup_output_directories(&args.output_dir)?;

    let stats = process_dataset(&dataset, &output_dirs, args)?;
    stats.print_summary();
    Ok(stats)
}
