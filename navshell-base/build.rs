//! Compiles the theme stylesheet into `OUT_DIR/theme.css`, where the library embeds it.

use std::{env, fs, io, path::PathBuf};

use grass::{Options, OutputStyle};
use grass_compiler::Error as SassError;
use thiserror::Error;

const THEME_SCSS: &str = "scss/theme.scss";

fn main() {
    println!("cargo:rerun-if-changed={THEME_SCSS}");
    if let Err(error) = build_theme_css() {
        panic!("{error}");
    }
}

#[derive(Debug, Error)]
enum ThemeCssError {
    #[error("failed to compile scss/theme.scss: {0}")]
    Compile(#[from] Box<SassError>),

    #[error("OUT_DIR is not set, so theme.css has nowhere to go")]
    NoOutDir,

    #[error("could not write {0}: {1}")]
    Write(PathBuf, #[source] io::Error),
}

fn build_theme_css() -> Result<(), ThemeCssError> {
    let css = grass::from_path(
        THEME_SCSS,
        &Options::default().style(OutputStyle::Compressed),
    )?;

    let out_path = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or(ThemeCssError::NoOutDir)?
        .join("theme.css");

    fs::write(&out_path, css).map_err(|err| ThemeCssError::Write(out_path, err))
}
