use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no artifact for contract {0:?}, make sure it is compiled")]
    NotFound(String),

    #[error(
        "multiple artifacts for contract {name:?}, use a fully qualified name: {}",
        candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },

    #[error("contract {0:?} has no bytecode, it is an interface or abstract contract")]
    NotDeployable(String),

    #[error("contract {0:?} references libraries that need to be linked first")]
    UnlinkedLibraries(String),

    #[error("invalid artifact {path:?}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("constructor of {contract:?} takes {expected} argument(s), {given} given")]
    ArgumentCount {
        contract: String,
        expected: usize,
        given: usize,
    },

    #[error("constructor argument #{index} of {contract:?} is not a valid {ty}: {value:?}")]
    ArgumentType {
        contract: String,
        index: usize,
        ty: String,
        value: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },

    #[error("constructor of {0:?} is not payable")]
    NonPayable(String),
}
