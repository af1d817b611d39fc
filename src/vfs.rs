use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the read-only portfolio tree.
///
/// Names live in the parent's `children` map, so siblings never collide.
/// The serde shape matches the JSON a host may pass in the terminal config:
/// `{"type":"directory","children":{...}}` or `{"type":"file","content":"..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inode {
    Directory {
        #[serde(default)]
        children: BTreeMap<String, Inode>,
    },
    File {
        #[serde(default)]
        content: String,
    },
}

impl Inode {
    pub fn dir() -> Self {
        Inode::Directory {
            children: BTreeMap::new(),
        }
    }

    pub fn file(content: &str) -> Self {
        Inode::File {
            content: content.into(),
        }
    }

    /// Directory built from `(name, content)` file pairs.
    pub fn dir_of_files(files: &[(&str, &str)]) -> Self {
        Inode::Directory {
            children: files
                .iter()
                .map(|(name, content)| ((*name).to_string(), Inode::file(content)))
                .collect(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Inode::Directory { .. })
    }

    pub fn children(&self) -> Option<&BTreeMap<String, Inode>> {
        match self {
            Inode::Directory { children } => Some(children),
            Inode::File { .. } => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Inode::File { content } => Some(content),
            Inode::Directory { .. } => None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&Inode> {
        self.children()?.get(name)
    }

    /// Child that is itself a directory.
    pub fn child_dir(&self, name: &str) -> Option<&Inode> {
        self.child(name).filter(|n| n.is_dir())
    }
}

/// The session's virtual filesystem. Built once, never written afterwards.
#[derive(Clone, Debug)]
pub struct Vfs {
    root: Inode,
}

impl Default for Vfs {
    fn default() -> Self {
        Self::portfolio()
    }
}

impl Vfs {
    pub fn from_root(root: Inode) -> Result<Self, ConfigError> {
        if !root.is_dir() {
            return Err(ConfigError::RootNotDirectory);
        }
        Ok(Vfs { root })
    }

    pub fn root(&self) -> &Inode {
        &self.root
    }

    /// Walk `path` (directory names from root). `None` if any segment is
    /// missing or names a file.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&Inode> {
        let mut node = &self.root;
        for part in path {
            node = node.child_dir(part.as_ref())?;
        }
        Some(node)
    }

    /// Directory directly under the root.
    pub fn top_level(&self, name: &str) -> Option<&Inode> {
        self.root.child_dir(name)
    }

    /// The built-in portfolio tree.
    pub fn portfolio() -> Self {
        let mut root = BTreeMap::new();
        root.insert(
            "education".to_string(),
            Inode::dir_of_files(&[
                (
                    "BTech_Biomedical_Engineering_IITH.txt",
                    "B.Tech in Biomedical Engineering from IIT Hyderabad",
                ),
                (
                    "Double_Major_Entrepreneurship_IITH.txt",
                    "Double Major in Entrepreneurship from IIT Hyderabad",
                ),
                ("Minor_Economics_IITH.txt", "Minor in Economics from IIT Hyderabad"),
                ("Class_XII_CBSE.txt", "Class XII CBSE Board Examination"),
                ("Class_X_CBSE.txt", "Class X CBSE Board Examination"),
            ]),
        );
        root.insert(
            "projects".to_string(),
            Inode::dir_of_files(&[
                (
                    "Hybrid_CNN_LSTM_Emotion_Recognition.txt",
                    "AI project for emotion recognition using hybrid CNN-LSTM architecture",
                ),
                (
                    "Data_Structures_Comparison.txt",
                    "Comparative analysis of various data structures and their performance",
                ),
                (
                    "Route_Optimization_Tool.txt",
                    "Tool for optimizing routes using graph algorithms",
                ),
                (
                    "CPU_Scheduling_Algorithms.txt",
                    "Implementation and comparison of CPU scheduling algorithms",
                ),
            ]),
        );
        root.insert(
            "experience".to_string(),
            Inode::dir_of_files(&[
                (
                    "Goldman_Sachs_Summer_Analyst_2025.txt",
                    "Summer Analyst position at Goldman Sachs (2025)",
                ),
                (
                    "Pentakod_Python_Developer_Intern_2024.txt",
                    "Python Developer Intern at Pentakod (2024)",
                ),
            ]),
        );
        root.insert(
            "skills".to_string(),
            Inode::dir_of_files(&[
                ("Programming_Languages.txt", "C, C++, Python, Java, JavaScript, SQL"),
                ("Development_Tools.txt", "Git, Docker, VS Code, IntelliJ, Jupyter"),
                (
                    "Python_Libraries.txt",
                    "NumPy, Pandas, TensorFlow, PyTorch, Scikit-learn",
                ),
                ("Other_Tools.txt", "MATLAB, R, MongoDB, PostgreSQL"),
            ]),
        );
        root.insert(
            "languages".to_string(),
            Inode::dir_of_files(&[
                ("C", "Advanced proficiency in C programming"),
                ("C++", "Expert level C++ with STL and OOP"),
                ("Python", "Professional Python development experience"),
                ("SQL", "Database design and query optimization"),
                ("FORTRAN", "Scientific computing with FORTRAN"),
                ("MATLAB", "Mathematical modeling and simulation"),
                ("VERILOG", "Hardware description language for FPGA"),
                ("HTML", "Web markup and semantic HTML"),
                ("CSS", "Advanced styling and responsive design"),
            ]),
        );
        root.insert(
            "courses".to_string(),
            Inode::dir_of_files(&[
                (
                    "Computer_Science.txt",
                    "Data Structures, Algorithms, Database Systems, Computer Networks",
                ),
                (
                    "Mathematics.txt",
                    "Linear Algebra, Calculus, Statistics, Discrete Mathematics",
                ),
                (
                    "Artificial_Intelligence.txt",
                    "Machine Learning, Deep Learning, Neural Networks, Computer Vision",
                ),
            ]),
        );
        root.insert(
            "extracurricular".to_string(),
            Inode::dir_of_files(&[
                ("NCC_Gold_Medal.txt", "National Cadet Corps Gold Medal recipient"),
                (
                    "Vishwakarma_Awards.txt",
                    "Excellence awards in technical competitions",
                ),
                (
                    "Office_of_Career_Services.txt",
                    "Career services team member at IIT Hyderabad",
                ),
                (
                    "Finance_and_Consulting_Club.txt",
                    "Active member of Finance and Consulting Club",
                ),
            ]),
        );
        root.insert(
            "contact".to_string(),
            Inode::dir_of_files(&[
                ("email.txt", "nishant@example.com"),
                ("phone.txt", "+91-XXXXXXXXXX"),
                ("github.txt", "https://github.com/nishant-iith"),
            ]),
        );
        Vfs {
            root: Inode::Directory { children: root },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_layout() {
        let vfs = Vfs::portfolio();
        let top: Vec<_> = vfs.root().children().unwrap().keys().cloned().collect();
        assert_eq!(
            top,
            vec![
                "contact",
                "courses",
                "education",
                "experience",
                "extracurricular",
                "languages",
                "projects",
                "skills"
            ]
        );
        assert_eq!(vfs.top_level("projects").unwrap().children().unwrap().len(), 4);
        assert_eq!(vfs.top_level("languages").unwrap().children().unwrap().len(), 9);
    }

    #[test]
    fn test_resolve() {
        let vfs = Vfs::portfolio();
        assert!(vfs.resolve::<&str>(&[]).unwrap().is_dir());
        assert!(vfs.resolve(&["skills"]).is_some());
        assert!(vfs.resolve(&["skills", "Other_Tools.txt"]).is_none());
        assert!(vfs.resolve(&["nowhere"]).is_none());
    }

    #[test]
    fn test_from_json_tree() {
        let json = r#"{"type":"directory","children":{
            "notes":{"type":"directory","children":{"a.txt":{"type":"file","content":"hi"}}}
        }}"#;
        let root: Inode = serde_json::from_str(json).unwrap();
        let vfs = Vfs::from_root(root).unwrap();
        let notes = vfs.resolve(&["notes"]).unwrap();
        assert_eq!(notes.child("a.txt").and_then(Inode::content), Some("hi"));
    }

    #[test]
    fn test_root_must_be_dir() {
        assert!(matches!(
            Vfs::from_root(Inode::file("x")),
            Err(ConfigError::RootNotDirectory)
        ));
    }
}
