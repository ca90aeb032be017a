// crates/autovid-core/src/assets.rs
//
// Directory listings for the selectable assets (Music, Intros) and for the
// input-folder thumbnail strip.
//
// Listing helpers never fail: an unreadable or missing directory is "no
// files". The option-list builders are split from the IO so the ordering
// rules can be tested against a fixed name sequence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];
/// The thumbnail strip also accepts a couple of legacy containers.
pub const PREVIEW_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "flv", "wmv"];

pub const OPTION_NONE:   &str = "None";
pub const OPTION_RANDOM: &str = "[RANDOM] Random";
pub const STOCK_INTRO:   &str = "StockDefault";

pub const TRIM_OPTIONS:  &[&str] = &["None", "5", "10", "15", "20", "25", "30"];
pub const DEFAULT_TRIM:  &str = "15";

pub const MUSIC_DIR_NAME:  &str = "Music";
pub const INTROS_DIR_NAME: &str = "Intros";
pub const LOGS_DIR_NAME:   &str = "logs";

/// Case-insensitive extension match against a whitelist.
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// File name without its final extension.
pub fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

/// File names in `dir` matching `extensions`, in directory enumeration order.
pub fn list_matching(dir: &Path, extensions: &[&str]) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name  = entry.file_name().to_string_lossy().into_owned();
        if has_extension(&name, extensions) {
            names.push(name);
        }
    }
    Ok(names)
}

/// The Folder File-Name Set for one directory. Errors collapse to empty.
pub fn file_name_set(dir: &Path, extensions: &[&str]) -> HashSet<String> {
    list_matching(dir, extensions)
        .map(|v| v.into_iter().collect())
        .unwrap_or_default()
}

// ── Dropdown option lists ─────────────────────────────────────────────────────

/// `None`, `[RANDOM] Random`, then the track stems in the order given.
pub fn music_options<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = vec![OPTION_NONE.to_string(), OPTION_RANDOM.to_string()];
    options.extend(
        names.into_iter()
            .filter(|n| has_extension(n.as_ref(), AUDIO_EXTENSIONS))
            .map(|n| file_stem(n.as_ref())),
    );
    options
}

pub fn available_music(dir: &Path) -> Vec<String> {
    music_options(list_matching(dir, AUDIO_EXTENSIONS).unwrap_or_default())
}

/// `StockDefault` first when present, then `[RANDOM] Random`, then the
/// sorted list of `None` plus every other intro stem.
pub fn intro_options<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rest  = vec![OPTION_NONE.to_string()];
    let mut stock = false;
    for name in names {
        let name = name.as_ref();
        if !has_extension(name, VIDEO_EXTENSIONS) {
            continue;
        }
        let stem = file_stem(name);
        if stem == STOCK_INTRO {
            stock = true;
        } else {
            rest.push(stem);
        }
    }
    rest.sort();

    let mut options = Vec::with_capacity(rest.len() + 2);
    if stock {
        options.push(STOCK_INTRO.to_string());
    }
    options.push(OPTION_RANDOM.to_string());
    options.extend(rest);
    options
}

pub fn available_intros(dir: &Path) -> Vec<String> {
    if !dir.exists() {
        return vec![OPTION_NONE.to_string(), STOCK_INTRO.to_string()];
    }
    match list_matching(dir, VIDEO_EXTENSIONS) {
        Ok(names) => intro_options(names),
        Err(_)    => vec![STOCK_INTRO.to_string()],
    }
}

/// Keep `current` when it is still offered, otherwise fall back to the first
/// option (or `fallback` when the list is empty).
pub fn reconcile_selection(current: &str, options: &[String], fallback: &str) -> String {
    if options.iter().any(|o| o == current) {
        current.to_string()
    } else {
        options.first().cloned().unwrap_or_else(|| fallback.to_string())
    }
}

// ── Thumbnail strip listing ───────────────────────────────────────────────────

/// Video files in the input folder, sorted by name, as full paths.
pub fn preview_videos(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut names = list_matching(dir, PREVIEW_EXTENSIONS)?;
    names.sort();
    Ok(names.into_iter().map(|n| {
        let p = dir.join(&n);
        (n, p)
    }).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(has_extension("Theme.MP3", AUDIO_EXTENSIONS));
        assert!(has_extension("clip.Mkv", VIDEO_EXTENSIONS));
        assert!(!has_extension("notes.txt", AUDIO_EXTENSIONS));
        assert!(!has_extension("mp3", AUDIO_EXTENSIONS));
    }

    #[test]
    fn music_keeps_enumeration_order_and_strips_extensions() {
        let opts = music_options(["theme.mp3", "boss.wav"]);
        assert_eq!(opts, vec!["None", "[RANDOM] Random", "theme", "boss"]);
    }

    #[test]
    fn music_ignores_non_audio() {
        let opts = music_options(["cover.png", "loop.flac"]);
        assert_eq!(opts, vec!["None", "[RANDOM] Random", "loop"]);
    }

    #[test]
    fn intros_put_stock_default_first() {
        let opts = intro_options(["zeta.mp4", "StockDefault.mp4", "alpha.mov"]);
        assert_eq!(opts, vec!["StockDefault", "[RANDOM] Random", "None", "alpha", "zeta"]);
    }

    #[test]
    fn intros_without_stock_default() {
        let opts = intro_options(["b.mkv"]);
        assert_eq!(opts, vec!["[RANDOM] Random", "None", "b"]);
    }

    #[test]
    fn missing_intro_dir_offers_stock_default() {
        let opts = available_intros(Path::new("/definitely/not/here/Intros"));
        assert_eq!(opts, vec!["None", "StockDefault"]);
    }

    #[test]
    fn missing_music_dir_offers_fixed_entries() {
        let opts = available_music(Path::new("/definitely/not/here/Music"));
        assert_eq!(opts, vec!["None", "[RANDOM] Random"]);
    }

    #[test]
    fn reconcile_keeps_or_falls_back() {
        let opts: Vec<String> = vec!["None".into(), "theme".into()];
        assert_eq!(reconcile_selection("theme", &opts, OPTION_RANDOM), "theme");
        assert_eq!(reconcile_selection("gone", &opts, OPTION_RANDOM), "None");
        assert_eq!(reconcile_selection("gone", &[], OPTION_RANDOM), OPTION_RANDOM);
    }
}
