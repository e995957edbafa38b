pub mod csv;
pub mod mesh;
pub mod output;

use std::path::{Path, PathBuf};

// Locations of a project's input and a run's output under a simulator tree
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub project: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: &Path, project: &str, run: &str) -> Self {
        ProjectPaths {
            project: project.to_string(),
            input_dir: root.join("input").join(project),
            output_dir: root.join("output").join(run),
        }
    }

    pub fn mesh_file(&self) -> PathBuf {
        self.input_dir.join(format!("{}.mesh", self.project))
    }

    pub fn binary_output(&self, var: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}.dat", self.project, var))
    }

    pub fn text_output(&self, var: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}.txt", self.project, var))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fresh scratch directory per test
    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pihm_plot_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn paths_follow_simulator_layout() {
        let paths = ProjectPaths::new(Path::new("/sim"), "ShaleHills", "ShaleHillsTestRun");
        assert_eq!(
            paths.mesh_file(),
            PathBuf::from("/sim/input/ShaleHills/ShaleHills.mesh")
        );
        assert_eq!(
            paths.binary_output("gw"),
            PathBuf::from("/sim/output/ShaleHillsTestRun/ShaleHills.gw.dat")
        );
        assert_eq!(
            paths.text_output("gw"),
            PathBuf::from("/sim/output/ShaleHillsTestRun/ShaleHills.gw.txt")
        );
    }
}
