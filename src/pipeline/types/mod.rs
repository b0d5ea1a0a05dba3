pub mod analysis_result;
pub mod asset;
pub mod color;
pub mod decoded_image;
pub mod element;
pub mod layout;
pub mod style;
pub mod typography;

pub use analysis_result::{AnalysisResult, ImageInfo, StageReport, StageStatus};
pub use asset::{AssetKind, AssetRecord};
pub use color::{hex_code, ColorSample, UsageContext};
pub use decoded_image::DecodedImage;
pub use element::{Dimensions, ElementKind, InteractiveElementRecord, Position};
pub use layout::{LayoutDescriptor, LayoutKind};
pub use style::{GlobalStyleTokens, StyleGuide};
pub use typography::{FontWeight, TextBounds, TextRole, TypographyRecord};
