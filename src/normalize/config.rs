//! Raw configuration answers to the canonical configuration tree.
//!
//! The raw answers under `_config` are denormalized: SQL connection settings
//! arrive as flat `_sql*` fields and applications as a flat `_apps` list in
//! which documentation sites appear as `<app>-doc`. [`normalize_config`]
//! reshapes them into the tree written to `config/<env>/config.json5`:
//!
//! ```json5
//! {
//!     listen: { api: { port: 3000 } },
//!     storage: {
//!         mysql: {
//!             host: 'localhost',
//!             ssl: false,
//!             databases: { main: { db: 'app', username: 'root', password: 'pw' } },
//!         },
//!     },
//!     apps: {
//!         api: {
//!             baseUrl: { $join: ['http://127.0.0.1:', { $ref: '#/listen/api/port' }] },
//!             stopOnError: false,
//!             bodyParser: { $ref: '#/bodyParser' },
//!             listen: { $ref: '#/listen/api/port' },
//!             response: { $ref: '#/response' },
//!         },
//!     },
//!     sequelize: {
//!         cache: false,
//!         dialect: 'mysql',
//!         host: { $ref: '#/storage/mysql/host' },
//!         // port, ssl, db, username, password likewise
//!     },
//! }
//! ```
//!
//! The `sequelize` block never holds its own copy of connection settings; every
//! connection field refers back into `storage.<provider>` so the two cannot
//! drift apart.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::answers::{CONFIG_KEY, json_type_name};
use crate::core::ScaffoldError;
use crate::directive::{ConfigValue, JoinPart, Pointer};

const SQL_PROVIDER: &str = "_sqlProvider";
const SQL_HOST: &str = "_sqlHost";
const SQL_PORT: &str = "_sqlPort";
const SQL_DATABASE: &str = "_sqlDatabase";
const SQL_USERNAME: &str = "_sqlUsername";
const SQL_PASSWORD: &str = "_sqlPassword";
const APPS: &str = "_apps";
const HOST: &str = "_host";

/// Suffix marking an app entry as the documentation site of another app.
pub const DOC_SUFFIX: &str = "-doc";

/// Normalized configuration tree, keys in output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigTree(IndexMap<String, ConfigValue>);

impl ConfigTree {
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Whether a relational backend was configured.
    pub fn has_sequelize(&self) -> bool {
        self.0.contains_key("sequelize")
    }

    /// Whether `storage.<backend>` exists.
    pub fn has_storage(&self, backend: &str) -> bool {
        self.get("storage").and_then(|storage| storage.get(backend)).is_some()
    }

    /// Names of the generated top-level apps, in order.
    pub fn app_names(&self) -> Vec<String> {
        match self.get("apps") {
            Some(ConfigValue::Section(apps)) => apps.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Plain JSON form with directives in their on-disk shape.
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.iter().map(|(key, value)| (key.clone(), value.to_json())).collect())
    }
}

/// Build the configuration tree from the raw `_config` answers.
///
/// # Errors
///
/// Returns [`ScaffoldError::Validation`] when:
/// - `storage` is present but not an object
/// - `_sqlProvider` is present but not a non-empty string without `/`
/// - an `_apps` entry is not a non-empty string without `/`
/// - apps are generated but `_host` is missing or not a string
///
/// An `_apps` value that is not a list is tolerated and yields no apps.
pub fn normalize_config(raw: &Map<String, Value>) -> Result<ConfigTree, ScaffoldError> {
    let mut root = IndexMap::new();

    if let Some(listen) = raw.get("listen") {
        root.insert("listen".to_string(), ConfigValue::Literal(listen.clone()));
    }

    let mut storage = passthrough_storage(raw)?;
    let mut sequelize = None;
    if let Some(provider) = sql_provider(raw)? {
        tracing::debug!("Adding {} storage and sequelize block", provider);
        storage.insert(provider.to_string(), sql_storage(raw));
        sequelize = Some(sequelize_block(provider)?);
    }

    root.insert("storage".to_string(), ConfigValue::Section(storage));
    root.insert("apps".to_string(), ConfigValue::Section(build_apps(raw)?));
    if let Some(sequelize) = sequelize {
        root.insert("sequelize".to_string(), sequelize);
    }

    Ok(ConfigTree(root))
}

fn field(name: &str) -> String {
    format!("{CONFIG_KEY}.{name}")
}

fn passthrough_storage(raw: &Map<String, Value>) -> Result<IndexMap<String, ConfigValue>, ScaffoldError> {
    match raw.get("storage") {
        None | Some(Value::Null) => Ok(IndexMap::new()),
        Some(Value::Object(backends)) => Ok(backends
            .iter()
            .map(|(name, params)| (name.clone(), ConfigValue::Literal(params.clone())))
            .collect()),
        Some(other) => Err(ScaffoldError::validation(
            field("storage"),
            format!("expected an object, found {}", json_type_name(other)),
        )),
    }
}

fn sql_provider(raw: &Map<String, Value>) -> Result<Option<&str>, ScaffoldError> {
    match raw.get(SQL_PROVIDER) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(provider)) if is_path_segment(provider) => Ok(Some(provider)),
        Some(other) => Err(ScaffoldError::validation(
            field(SQL_PROVIDER),
            format!("expected a provider name, found {}", describe(other)),
        )),
    }
}

/// `storage.<provider>` entry built from the flat `_sql*` answers.
///
/// Missing source fields are left out rather than written as null.
fn sql_storage(raw: &Map<String, Value>) -> ConfigValue {
    let mut main = IndexMap::new();
    copy_field(raw, SQL_DATABASE, "db", &mut main);
    copy_field(raw, SQL_USERNAME, "username", &mut main);
    copy_field(raw, SQL_PASSWORD, "password", &mut main);

    let mut databases = IndexMap::new();
    databases.insert("main".to_string(), ConfigValue::Section(main));

    let mut entry = IndexMap::new();
    copy_field(raw, SQL_HOST, "host", &mut entry);
    copy_field(raw, SQL_PORT, "port", &mut entry);
    entry.insert("ssl".to_string(), Value::Bool(false).into());
    entry.insert("databases".to_string(), ConfigValue::Section(databases));
    ConfigValue::Section(entry)
}

fn copy_field(
    raw: &Map<String, Value>,
    from: &str,
    to: &str,
    target: &mut IndexMap<String, ConfigValue>,
) {
    if let Some(value) = raw.get(from) {
        target.insert(to.to_string(), ConfigValue::Literal(value.clone()));
    }
}

fn sequelize_block(provider: &str) -> Result<ConfigValue, ScaffoldError> {
    let mut block = IndexMap::new();
    block.insert("cache".to_string(), Value::Bool(false).into());
    block.insert("dialect".to_string(), Value::String(provider.to_string()).into());
    for (key, path) in [
        ("host", &["host"][..]),
        ("port", &["port"][..]),
        ("ssl", &["ssl"][..]),
        ("db", &["databases", "main", "db"][..]),
        ("username", &["databases", "main", "username"][..]),
        ("password", &["databases", "main", "password"][..]),
    ] {
        let pointer = ["storage", provider].into_iter().chain(path.iter().copied());
        block.insert(key.to_string(), ConfigValue::reference(pointer)?);
    }
    Ok(ConfigValue::Section(block))
}

/// Raw app names, or `None` when `_apps` is absent or not a list.
fn raw_app_names(raw: &Map<String, Value>) -> Result<Option<Vec<&str>>, ScaffoldError> {
    let items = match raw.get(APPS) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => {
            // Treated as "no apps".
            tracing::warn!(
                "Ignoring {}: expected a list of app names, found {}",
                field(APPS),
                json_type_name(other)
            );
            return Ok(None);
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(name) if is_path_segment(name) => Ok(name.as_str()),
            other => Err(ScaffoldError::validation(
                format!("{}[{i}]", field(APPS)),
                format!("expected an app name, found {}", describe(other)),
            )),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn build_apps(raw: &Map<String, Value>) -> Result<IndexMap<String, ConfigValue>, ScaffoldError> {
    let mut apps = IndexMap::new();
    let Some(names) = raw_app_names(raw)? else {
        return Ok(apps);
    };

    let top_level: Vec<&str> = names.iter().copied().filter(|name| !name.contains(DOC_SUFFIX)).collect();
    if top_level.is_empty() {
        return Ok(apps);
    }

    let host = match raw.get(HOST) {
        Some(Value::String(host)) => host.as_str(),
        other => {
            return Err(ScaffoldError::validation(
                field(HOST),
                format!(
                    "expected the base URL host, found {}",
                    other.map_or("nothing", json_type_name)
                ),
            ));
        }
    };

    for name in top_level {
        let mut app = IndexMap::new();
        app.insert("baseUrl".to_string(), base_url(host, name)?);
        app.insert("stopOnError".to_string(), Value::Bool(false).into());
        app.insert("bodyParser".to_string(), ConfigValue::reference(["bodyParser"])?);
        app.insert("listen".to_string(), port_ref(name)?);
        app.insert("response".to_string(), ConfigValue::reference(["response"])?);

        let doc_name = format!("{name}{DOC_SUFFIX}");
        if names.contains(&doc_name.as_str()) {
            tracing::debug!("Nesting {} under apps.{}.doc", doc_name, name);
            app.insert("doc".to_string(), doc_app(host, &doc_name)?);
        }

        apps.insert(name.to_string(), ConfigValue::Section(app));
    }

    Ok(apps)
}

fn doc_app(host: &str, doc_name: &str) -> Result<ConfigValue, ScaffoldError> {
    let mut doc = IndexMap::new();
    doc.insert("baseUrl".to_string(), base_url(host, doc_name)?);
    doc.insert("listen".to_string(), port_ref(doc_name)?);
    doc.insert("name".to_string(), Value::String("docs".to_string()).into());
    doc.insert("title".to_string(), Value::String("Docs".to_string()).into());
    doc.insert("stopOnError".to_string(), Value::Bool(true).into());
    doc.insert("tryItOut".to_string(), Value::Bool(false).into());
    Ok(ConfigValue::Section(doc))
}

fn port_ref(app: &str) -> Result<ConfigValue, ScaffoldError> {
    ConfigValue::reference(["listen", app, "port"])
}

fn base_url(host: &str, app: &str) -> Result<ConfigValue, ScaffoldError> {
    Ok(ConfigValue::Join(vec![
        JoinPart::Literal(format!("{host}:")),
        JoinPart::Ref(Pointer::from_segments(["listen", app, "port"])?),
    ]))
}

fn is_path_segment(name: &str) -> bool {
    !name.is_empty() && !name.contains('/')
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => json_type_name(other).to_string(),
    }
}
