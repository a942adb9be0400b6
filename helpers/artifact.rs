//! Loading `.contract` bundles and encoding constructor calls

use std::{fs, path::Path};

use log::debug;
use scale_info::{form::PortableForm, PortableRegistry, Type};
use serde::Deserialize;
use subxt::{dynamic::Value, ext::scale_encode::EncodeAsType};

use crate::error::DeployError;

/// A compiled ink! contract: code plus the ABI needed to call its constructors
#[derive(Debug)]
pub struct ContractBundle {
    pub name: Option<String>,
    pub version: Option<String>,
    code: Vec<u8>,
    constructors: Vec<ConstructorSpec>,
    registry: PortableRegistry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstructorSpec {
    pub label: String,
    pub selector: String,
    #[serde(default)]
    pub args: Vec<MessageParam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageParam {
    pub label: String,
    #[serde(rename = "type")]
    pub ty: TypeSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSpec {
    #[serde(rename = "type")]
    pub id: u32,
    #[serde(default)]
    pub display_name: Vec<String>,
}

// On-disk layout of the bundle. Only the parts needed for deployment are kept.
#[derive(Deserialize)]
struct RawBundle {
    source: RawSource,
    #[serde(default)]
    contract: Option<RawContractInfo>,
    #[serde(flatten)]
    abi: RawAbi,
}

// ink! 3 nests the ABI under a version key, ink! 4 and later inline it
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAbi {
    V3 {
        #[serde(rename = "V3")]
        v3: RawMetadata,
    },
    Inline(RawMetadata),
}

impl RawAbi {
    fn into_metadata(self) -> RawMetadata {
        match self {
            Self::V3 { v3 } => v3,
            Self::Inline(metadata) => metadata,
        }
    }
}

#[derive(Deserialize)]
struct RawMetadata {
    spec: RawSpec,
    #[serde(flatten)]
    registry: PortableRegistry,
}

#[derive(Deserialize)]
struct RawSource {
    #[serde(default)]
    wasm: Option<String>,
}

#[derive(Deserialize)]
struct RawContractInfo {
    name: String,
    version: String,
}

#[derive(Deserialize)]
struct RawSpec {
    constructors: Vec<ConstructorSpec>,
}

impl ContractBundle {
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let json = fs::read_to_string(path).map_err(|source| DeployError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle = Self::from_json(&json)?;
        debug!(
            "Loaded contract artifact {} ({} bytes of code, {} constructors)",
            path.display(),
            bundle.code.len(),
            bundle.constructors.len()
        );
        Ok(bundle)
    }

    pub fn from_json(json: &str) -> Result<Self, DeployError> {
        let raw: RawBundle = serde_json::from_str(json)?;

        let wasm = raw.source.wasm.ok_or_else(|| {
            DeployError::ArtifactFormat("bundle carries no `source.wasm` blob".to_owned())
        })?;
        let code = decode_hex(&wasm)
            .map_err(|err| DeployError::ArtifactFormat(format!("source.wasm: {err}")))?;
        if code.is_empty() {
            return Err(DeployError::ArtifactFormat("source.wasm is empty".to_owned()));
        }

        let metadata = raw.abi.into_metadata();
        let (name, version) = match raw.contract {
            Some(info) => (Some(info.name), Some(info.version)),
            None => (None, None),
        };

        Ok(Self {
            name,
            version,
            code,
            constructors: metadata.spec.constructors,
            registry: metadata.registry,
        })
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn constructors(&self) -> &[ConstructorSpec] {
        &self.constructors
    }

    pub fn constructor(&self, label: &str) -> Result<&ConstructorSpec, DeployError> {
        self.constructors
            .iter()
            .find(|c| c.label == label)
            .ok_or_else(|| DeployError::ConstructorNotFound(label.to_owned()))
    }

    /// Build the instantiation input: selector followed by the SCALE encoded
    /// arguments, each encoded against the type the ABI declares for it.
    pub fn encode_constructor(&self, label: &str, args: Vec<Value>) -> Result<Vec<u8>, DeployError> {
        let constructor = self.constructor(label)?;
        if constructor.args.len() != args.len() {
            return Err(DeployError::ConstructorArity {
                label: label.to_owned(),
                expected: constructor.args.len(),
                provided: args.len(),
            });
        }

        let mut data = decode_hex(&constructor.selector).map_err(|err| {
            DeployError::ArtifactFormat(format!("selector of `{label}`: {err}"))
        })?;

        for (param, value) in constructor.args.iter().zip(args) {
            let value = self.fit_to_type(value, param.ty.id);
            value
                .encode_as_type_to(param.ty.id, &self.registry, &mut data)
                .map_err(|err| DeployError::ArgumentEncoding {
                    arg: param.label.clone(),
                    reason: err.to_string(),
                })?;
        }

        Ok(data)
    }

    // Callers pass plain values; `Option<T>` parameters receive `Some(value)`
    fn fit_to_type(&self, value: Value, type_id: u32) -> Value {
        match self.registry.resolve(type_id) {
            Some(ty) if is_option(ty) => Value::unnamed_variant("Some", [value]),
            _ => value,
        }
    }
}

fn is_option(ty: &Type<PortableForm>) -> bool {
    ty.path.segments.last().is_some_and(|segment| segment == "Option")
}

fn decode_hex(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(value.trim_start_matches("0x"))
}
