use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments for converting NABirds annotations to VOC format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Directory containing the NABirds annotation text files
    #[arg(default_value = ".")]
    pub dataset_dir: PathBuf,

    /// Prefix joined with every image path listed in images.txt
    #[arg(default_value = "images")]
    pub image_root: PathBuf,

    /// Directory in which Annotations/ and VOCImages/ are created
    #[arg(short = 'o', long = "output_dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum number of images to convert; zero or a negative value converts all of them
    #[arg(
        short = 'n',
        long = "num_examples",
        default_value_t = -1,
        allow_hyphen_values = true,
        value_parser = validate_num_examples
    )]
    pub num_examples: i64,

    /// Seed for the processing order; drawn from entropy when omitted
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Process images in sorted id order instead of shuffling them
    #[arg(long = "no_shuffle")]
    pub no_shuffle: bool,

    /// Which part of the train/test split to convert
    #[arg(long = "split", value_enum, default_value = "all")]
    pub split: Split,
}

impl Args {
    /// The cap on converted images, or `None` when unlimited
    pub fn example_limit(&self) -> Option<usize> {
        match self.num_examples {
            n if n > 0 => usize::try_from(n).ok(),
            _ => None,
        }
    }
}

// Subset of the train/test split to convert
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Split {
    All,
    Train,
    Test,
}

// Accept any integer; values below one mean "no limit"
pub fn validate_num_examples(s: &str) -> Result<i64, String> {
    i64::from_str(s.trim()).map_err(|_| format!("NUM_EXAMPLES must be an integer, got '{}'", s))
}
