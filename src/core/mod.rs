pub mod interaction;
pub mod markers;
pub mod media;
pub mod paths;
pub mod playback;
pub mod raster;
pub mod scene;
pub mod time_format;
pub mod viewport;
