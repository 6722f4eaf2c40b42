use {
    crate::{Artifact, ContractFactory, Error},
    std::{
        ffi::OsStr,
        path::{Path, PathBuf},
    },
};

/// Where Hardhat writes artifacts relative to the project root.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Directories inside the artifacts directory that never contain contract
/// artifacts.
const IGNORED_DIRS: &[&str] = &["build-info"];

/// Resolves contract names to artifacts in a Hardhat `artifacts/` directory.
///
/// Hardhat stores the artifact of contract `C` declared in `contracts/F.sol`
/// at `artifacts/contracts/F.sol/C.json`, next to a `C.dbg.json` debug file.
#[derive(Clone, Debug)]
pub struct ArtifactRegistry {
    root: PathBuf,
}

impl ArtifactRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns a factory for the contract `name`, which is either a bare
    /// contract name (`Project`) or a fully qualified one
    /// (`contracts/Project.sol:Project`).
    pub fn contract_factory(&self, name: &str) -> Result<ContractFactory, Error> {
        let path = self.find(name)?;
        tracing::debug!(?path, "loading artifact for {name}");
        ContractFactory::from_artifact(Artifact::load(&path)?)
    }

    /// Finds the artifact file of a contract.
    fn find(&self, name: &str) -> Result<PathBuf, Error> {
        if let Some((source_name, contract_name)) = name.rsplit_once(':') {
            let path = self
                .root
                .join(source_name)
                .join(format!("{contract_name}.json"));
            if !path.is_file() {
                return Err(Error::NotFound(name.to_string()));
            }
            return Ok(path);
        }

        let mut candidates = Vec::new();
        self.collect(&self.root, &format!("{name}.json"), &mut candidates)
            .map_err(|err| Error::Invalid {
                path: self.root.clone(),
                source: anyhow::Error::new(err).context("failed to scan artifacts directory"),
            })?;
        candidates.sort();

        match candidates.len() {
            0 => Err(Error::NotFound(name.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(Error::Ambiguous {
                name: name.to_string(),
                candidates: candidates
                    .iter()
                    .map(|path| self.qualified_name(path, name))
                    .collect(),
            }),
        }
    }

    fn collect(
        &self,
        dir: &Path,
        file_name: &str,
        found: &mut Vec<PathBuf>,
    ) -> std::io::Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                if path
                    .file_name()
                    .and_then(OsStr::to_str)
                    .is_some_and(|dir| IGNORED_DIRS.contains(&dir))
                {
                    continue;
                }
                self.collect(&path, file_name, found)?;
            } else if path.file_name() == Some(OsStr::new(file_name)) {
                found.push(path);
            }
        }
        Ok(())
    }

    fn qualified_name(&self, path: &Path, name: &str) -> String {
        let source = path
            .parent()
            .and_then(|parent| parent.strip_prefix(&self.root).ok())
            .map(|source| source.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        format!("{source}:{name}")
    }
}
