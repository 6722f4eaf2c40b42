use {
    crate::Error,
    alloy::{
        json_abi::JsonAbi,
        primitives::{Bytes, hex},
    },
    anyhow::Context,
    serde::Deserialize,
    std::path::Path,
};

/// A Hardhat compilation artifact (`hh-sol-artifact-1`).
///
/// Only the fields needed for deploying are read, everything else in the file
/// is ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Creation code as a hex string. Kept as a string because it contains
    /// `__$<hash>$__` placeholders when the contract uses external libraries.
    pub bytecode: String,
}

impl Artifact {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let invalid = |source: anyhow::Error| Error::Invalid {
            path: path.to_owned(),
            source,
        };
        let data = std::fs::read_to_string(path)
            .context("failed to read file")
            .map_err(invalid)?;
        serde_json::from_str(&data)
            .context("failed to parse artifact JSON")
            .map_err(invalid)
    }

    /// The `<sourceName>:<contractName>` identifier Hardhat uses to
    /// disambiguate contracts with the same name.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Decodes the creation code.
    pub fn creation_code(&self) -> Result<Bytes, Error> {
        let code = self.bytecode.trim();
        if code.contains("__") {
            return Err(Error::UnlinkedLibraries(self.contract_name.clone()));
        }
        let code = hex::decode(code).map_err(|err| Error::Invalid {
            path: self.fully_qualified_name().into(),
            source: anyhow::Error::new(err).context("bytecode is not valid hex"),
        })?;
        if code.is_empty() {
            return Err(Error::NotDeployable(self.contract_name.clone()));
        }
        Ok(code.into())
    }
}
