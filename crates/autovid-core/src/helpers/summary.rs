// crates/autovid-core/src/helpers/summary.rs
//
// Text for the "Current Configuration" box on the Vid Compiler tab.

use std::path::Path;

const RULE_WIDTH: usize = 50;

pub struct FolderSummary<'a> {
    pub input_path:  &'a str,
    pub output_path: &'a str,
    pub music_dir:   &'a Path,
    pub music_count: usize,
    pub intro_dir:   &'a Path,
    pub intro_count: usize,
}

impl FolderSummary<'_> {
    pub fn is_ready(&self) -> bool {
        !self.input_path.trim().is_empty() && !self.output_path.trim().is_empty()
    }

    pub fn render(&self) -> String {
        let unset = "[ERROR] Not set - Click Browse button";
        let show  = |p: &str| if p.trim().is_empty() { unset.to_string() } else { p.to_string() };
        let rule  = "-".repeat(RULE_WIDTH);

        let mut out = String::new();
        out.push_str("[FOLDER] FOLDER CONFIGURATION:\n");
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("[INPUT] Input:  {}\n", show(self.input_path)));
        out.push_str(&format!("[OUTPUT] Output: {}\n", show(self.output_path)));
        out.push_str(&format!("[MUSIC] Music:  {} ({} tracks) [OK]\n",
            self.music_dir.display(), self.music_count));
        out.push_str(&format!("Intros: {} ({} videos) [OK]\n",
            self.intro_dir.display(), self.intro_count));
        out.push_str(&rule);
        out.push('\n');
        if self.is_ready() {
            out.push_str("[OK] Ready to compile videos!");
        } else {
            out.push_str("[WARN] Please set input and output folders above");
        }
        out
    }
}
