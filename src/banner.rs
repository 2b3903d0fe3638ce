//! Startup banner.

use std::path::Path;

/// Runtime settings shown when the bot starts.
pub struct BannerInfo<'a> {
    pub display_lang: &'a str,
    pub db_path: &'a Path,
}

pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║            K I N O B O T              ║
   ║   a title in, a movie card out        ║
   ╚═══════════════════════════════════════╝

   version   {}
   language  {}
   audit db  {}
"#,
        env!("CARGO_PKG_VERSION"),
        info.display_lang,
        info.db_path.display(),
    )
}

/// Print the startup banner.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}
