use {
    crate::{Artifact, Error},
    alloy::{
        dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier},
        json_abi::{Constructor, JsonAbi, StateMutability},
        primitives::Bytes,
    },
};

/// A handle bound to a compiled contract that builds the code of a
/// deployment transaction.
#[derive(Clone, Debug)]
pub struct ContractFactory {
    name: String,
    source_name: String,
    abi: JsonAbi,
    creation_code: Bytes,
}

impl ContractFactory {
    pub fn from_artifact(artifact: Artifact) -> Result<Self, Error> {
        let creation_code = artifact.creation_code()?;
        Ok(Self {
            name: artifact.contract_name,
            source_name: artifact.source_name,
            abi: artifact.abi,
            creation_code,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    fn constructor(&self) -> Option<&Constructor> {
        self.abi.constructor.as_ref()
    }

    /// Whether the constructor accepts value. Contracts without an explicit
    /// constructor never do.
    pub fn is_payable(&self) -> bool {
        self.constructor()
            .is_some_and(|constructor| constructor.state_mutability == StateMutability::Payable)
    }

    /// Canonical types of the constructor parameters, e.g. `["uint256",
    /// "address"]`.
    pub fn constructor_types(&self) -> Vec<String> {
        self.constructor()
            .map(|constructor| {
                constructor
                    .inputs
                    .iter()
                    .map(|param| param.selector_type().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Fails if `value` cannot be attached to the deployment.
    pub fn check_value(&self, attaching_value: bool) -> Result<(), Error> {
        if attaching_value && !self.is_payable() {
            return Err(Error::NonPayable(self.name.clone()));
        }
        Ok(())
    }

    /// Builds the deployment code: the creation code followed by the ABI
    /// encoded constructor arguments. Arguments are given in their Solidity
    /// literal form and coerced to the declared parameter types.
    pub fn deploy_code(&self, args: &[String]) -> Result<Bytes, Error> {
        let Some(constructor) = self.constructor() else {
            if !args.is_empty() {
                return Err(self.argument_count(0, args.len()));
            }
            return Ok(self.creation_code.clone());
        };
        if constructor.inputs.len() != args.len() {
            return Err(self.argument_count(constructor.inputs.len(), args.len()));
        }

        let values = constructor
            .inputs
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (param, arg))| {
                let argument_type = |source| Error::ArgumentType {
                    contract: self.name.clone(),
                    index,
                    ty: param.selector_type().into_owned(),
                    value: arg.clone(),
                    source,
                };
                let ty: DynSolType = param.resolve().map_err(argument_type)?;
                ty.coerce_str(arg).map_err(argument_type)
            })
            .collect::<Result<Vec<DynSolValue>, _>>()?;
        let encoded = constructor
            .abi_encode_input(&values)
            .map_err(|source| Error::ArgumentType {
                contract: self.name.clone(),
                index: 0,
                ty: self.constructor_types().join(","),
                value: args.join(","),
                source,
            })?;

        let mut code = Vec::with_capacity(self.creation_code.len() + encoded.len());
        code.extend_from_slice(&self.creation_code);
        code.extend_from_slice(&encoded);
        Ok(code.into())
    }

    fn argument_count(&self, expected: usize, given: usize) -> Error {
        Error::ArgumentCount {
            contract: self.name.clone(),
            expected,
            given,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{U256, address},
    };

    const CODE: &str = "0x6001600c60003960016000f300";

    fn factory(abi: serde_json::Value) -> ContractFactory {
        let artifact: Artifact = serde_json::from_value(serde_json::json!({
            "contractName": "CommunityInsurancePool",
            "sourceName": "contracts/CommunityInsurancePool.sol",
            "abi": abi,
            "bytecode": CODE,
        }))
        .unwrap();
        ContractFactory::from_artifact(artifact).unwrap()
    }

    fn constructor(inputs: serde_json::Value, mutability: &str) -> serde_json::Value {
        serde_json::json!([{
            "type": "constructor",
            "inputs": inputs,
            "stateMutability": mutability,
        }])
    }

    #[test]
    fn without_constructor_code_is_unchanged() {
        let factory = factory(serde_json::json!([]));
        assert!(!factory.is_payable());
        assert_eq!(
            factory.deploy_code(&[]).unwrap().to_vec(),
            alloy::primitives::hex::decode(CODE).unwrap()
        );
        assert!(matches!(
            factory.deploy_code(&["1".to_string()]),
            Err(Error::ArgumentCount {
                expected: 0,
                given: 1,
                ..
            })
        ));
    }

    #[test]
    fn appends_encoded_arguments() {
        let factory = factory(constructor(
            serde_json::json!([
                { "name": "premium", "type": "uint256", "internalType": "uint256" },
                { "name": "owner", "type": "address", "internalType": "address" },
            ]),
            "nonpayable",
        ));
        assert_eq!(factory.constructor_types(), ["uint256", "address"]);

        let owner = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let code = factory
            .deploy_code(&["42".to_string(), owner.to_string()])
            .unwrap();

        let creation_code = alloy::primitives::hex::decode(CODE).unwrap();
        assert_eq!(code.len(), creation_code.len() + 64);
        assert_eq!(&code[..creation_code.len()], creation_code.as_slice());
        assert_eq!(
            U256::from_be_slice(&code[creation_code.len()..creation_code.len() + 32]),
            U256::from(42)
        );
        assert_eq!(&code[code.len() - 20..], owner.as_slice());
    }

    #[test]
    fn rejects_mismatching_arguments() {
        let factory = factory(constructor(
            serde_json::json!([{ "name": "premium", "type": "uint256" }]),
            "nonpayable",
        ));
        assert!(matches!(
            factory.deploy_code(&[]),
            Err(Error::ArgumentCount {
                expected: 1,
                given: 0,
                ..
            })
        ));
        assert!(matches!(
            factory.deploy_code(&["not a number".to_string()]),
            Err(Error::ArgumentType { index: 0, ref ty, .. }) if ty == "uint256"
        ));
    }

    #[test]
    fn only_payable_constructors_accept_value() {
        let payable = factory(constructor(serde_json::json!([]), "payable"));
        assert!(payable.is_payable());
        assert!(payable.check_value(true).is_ok());

        let non_payable = factory(constructor(serde_json::json!([]), "nonpayable"));
        assert!(non_payable.check_value(false).is_ok());
        assert!(matches!(
            non_payable.check_value(true),
            Err(Error::NonPayable(name)) if name == "CommunityInsurancePool"
        ));

        let implicit = factory(serde_json::json!([]));
        assert!(matches!(implicit.check_value(true), Err(Error::NonPayable(_))));
    }
}
