//! The standard OCCI category sets.
//!
//! ```text
//! core#entity
//! ├── core#resource
//! │   ├── infrastructure#compute   (start stop restart suspend)
//! │   ├── infrastructure#network   (up down)         ← ipnetwork
//! │   └── infrastructure#storage   (online offline backup snapshot resize)
//! └── core#link
//!     ├── infrastructure#networkinterface            ← ipnetworkinterface
//!     └── infrastructure#storagelink
//! ```
//!
//! `os_tpl` and `resource_tpl` are template mixins applied to compute.

use super::Collection;
use crate::attributes::{AttributeDefinition, AttributeType};
use crate::base::TypeIdentifier;
use crate::base::constants::{
    ATTR_ID, ATTR_SOURCE, ATTR_SUMMARY, ATTR_TARGET, ATTR_TITLE, CORE_SCHEME,
    INFRASTRUCTURE_NAMESPACE, INFRASTRUCTURE_SCHEME,
};
use crate::category::{Action, Kind, Mixin};
use crate::error::Result;

fn string() -> AttributeDefinition {
    AttributeDefinition::new(AttributeType::String)
}

fn mutable(attr_type: AttributeType) -> AttributeDefinition {
    AttributeDefinition::new(attr_type).with_mutable(true)
}

fn state(values: &str) -> Result<AttributeDefinition> {
    string().with_pattern(values)
}

fn core_id(term: &str) -> Result<TypeIdentifier> {
    TypeIdentifier::new(CORE_SCHEME, term)
}

fn infra_id(term: &str) -> Result<TypeIdentifier> {
    TypeIdentifier::new(INFRASTRUCTURE_SCHEME, term)
}

fn action_scheme(kind: &str) -> String {
    format!("{INFRASTRUCTURE_NAMESPACE}{kind}/action#")
}

/// Kinds `entity`, `resource` and `link`.
pub(super) fn core() -> Result<Collection> {
    let entity = Kind::new(CORE_SCHEME, "entity")?
        .with_title("Entity")
        .with_attribute(ATTR_ID, string().with_required(true))?
        .with_attribute(ATTR_TITLE, mutable(AttributeType::String))?;
    let resource = Kind::new(CORE_SCHEME, "resource")?
        .with_title("Resource")
        .with_parent(core_id("entity")?)
        .with_attribute(ATTR_SUMMARY, mutable(AttributeType::String))?;
    let link = Kind::new(CORE_SCHEME, "link")?
        .with_title("Link")
        .with_parent(core_id("entity")?)
        .with_attribute(ATTR_SOURCE, mutable(AttributeType::String).with_required(true))?
        .with_attribute(ATTR_TARGET, mutable(AttributeType::String).with_required(true))?;

    Ok(Collection::new()
        .with_kind(entity)
        .with_kind(resource)
        .with_kind(link))
}

/// The infrastructure extension. Depends on [`core`] being registered.
pub(super) fn infrastructure() -> Result<Collection> {
    let mut collection = Collection::new();
    compute(&mut collection)?;
    network(&mut collection)?;
    storage(&mut collection)?;
    links(&mut collection)?;
    templates(&mut collection)?;
    Ok(collection)
}

fn add_actions(collection: &mut Collection, kind: Kind, actions: Vec<Action>) -> Kind {
    let mut kind = kind;
    for action in actions {
        kind = kind.with_action(action.identifier().clone());
        collection.add_action(action);
    }
    kind
}

fn compute(collection: &mut Collection) -> Result<()> {
    let scheme = action_scheme("compute");
    let actions = vec![
        Action::new(&scheme, "start")?.with_title("Start the system"),
        Action::new(&scheme, "stop")?
            .with_title("Stop the system")
            .with_attribute("method", state("graceful|acpioff|poweroff")?)?,
        Action::new(&scheme, "restart")?
            .with_title("Restart the system")
            .with_attribute("method", state("graceful|warm|cold")?)?,
        Action::new(&scheme, "suspend")?
            .with_title("Suspend the system")
            .with_attribute("method", state("hibernate|suspend")?)?,
    ];
    let kind = Kind::new(INFRASTRUCTURE_SCHEME, "compute")?
        .with_title("Compute Resource")
        .with_parent(core_id("resource")?)
        .with_attribute(
            "occi.compute.architecture",
            mutable(AttributeType::String).with_pattern("x86|x64")?,
        )?
        .with_attribute("occi.compute.cores", mutable(AttributeType::Integer))?
        .with_attribute("occi.compute.share", mutable(AttributeType::Integer))?
        .with_attribute("occi.compute.hostname", mutable(AttributeType::String))?
        .with_attribute("occi.compute.speed", mutable(AttributeType::Numeric))?
        .with_attribute("occi.compute.memory", mutable(AttributeType::Numeric))?
        .with_attribute(
            "occi.compute.state",
            state("active|inactive|suspended|error")?.with_default("inactive"),
        )?
        .with_attribute("occi.compute.state.message", string())?;
    let kind = add_actions(collection, kind, actions);
    collection.add_kind(kind);
    Ok(())
}

fn network(collection: &mut Collection) -> Result<()> {
    let scheme = action_scheme("network");
    let actions = vec![
        Action::new(&scheme, "up")?.with_title("Activate the network"),
        Action::new(&scheme, "down")?.with_title("Deactivate the network"),
    ];
    let kind = Kind::new(INFRASTRUCTURE_SCHEME, "network")?
        .with_title("Network Resource")
        .with_parent(core_id("resource")?)
        .with_attribute("occi.network.vlan", mutable(AttributeType::Integer))?
        .with_attribute("occi.network.label", mutable(AttributeType::String))?
        .with_attribute("occi.network.state", state("active|inactive|error")?)?
        .with_attribute("occi.network.state.message", string())?;
    let kind = add_actions(collection, kind, actions);
    collection.add_kind(kind);

    let ipnetwork = Mixin::new(&format!("{INFRASTRUCTURE_NAMESPACE}network#"), "ipnetwork")?
        .with_title("IP Networking Mixin")
        .with_applies(infra_id("network")?)
        .with_attribute("occi.network.address", mutable(AttributeType::String))?
        .with_attribute("occi.network.gateway", mutable(AttributeType::String))?
        .with_attribute(
            "occi.network.allocation",
            mutable(AttributeType::String).with_pattern("dynamic|static")?,
        )?;
    collection.add_mixin(ipnetwork);
    Ok(())
}

fn storage(collection: &mut Collection) -> Result<()> {
    let scheme = action_scheme("storage");
    let actions = vec![
        Action::new(&scheme, "online")?.with_title("Activate the storage"),
        Action::new(&scheme, "offline")?.with_title("Deactivate the storage"),
        Action::new(&scheme, "backup")?.with_title("Backup the storage"),
        Action::new(&scheme, "snapshot")?
            .with_title("Snapshot the storage")
            .with_attribute("method", state("hot|deferred")?)?,
        Action::new(&scheme, "resize")?
            .with_title("Resize the storage")
            .with_attribute(
                "size",
                AttributeDefinition::new(AttributeType::Numeric).with_required(true),
            )?,
    ];
    let kind = Kind::new(INFRASTRUCTURE_SCHEME, "storage")?
        .with_title("Storage Resource")
        .with_parent(core_id("resource")?)
        .with_attribute("occi.storage.size", mutable(AttributeType::Numeric))?
        .with_attribute(
            "occi.storage.state",
            state("online|offline|backup|snapshot|resize|degraded|error")?,
        )?
        .with_attribute("occi.storage.state.message", string())?;
    let kind = add_actions(collection, kind, actions);
    collection.add_kind(kind);
    Ok(())
}

fn links(collection: &mut Collection) -> Result<()> {
    let networkinterface = Kind::new(INFRASTRUCTURE_SCHEME, "networkinterface")?
        .with_title("NetworkInterface")
        .with_parent(core_id("link")?)
        .with_attribute("occi.networkinterface.interface", string())?
        .with_attribute(
            "occi.networkinterface.mac",
            mutable(AttributeType::String)
                .with_pattern("([0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}")?,
        )?
        .with_attribute("occi.networkinterface.state", state("active|inactive|error")?)?
        .with_attribute("occi.networkinterface.state.message", string())?;
    collection.add_kind(networkinterface);

    let ipnetworkinterface = Mixin::new(
        &format!("{INFRASTRUCTURE_NAMESPACE}networkinterface#"),
        "ipnetworkinterface",
    )?
    .with_title("IP Network Interface Mixin")
    .with_applies(infra_id("networkinterface")?)
    .with_attribute("occi.networkinterface.address", mutable(AttributeType::String))?
    .with_attribute("occi.networkinterface.gateway", mutable(AttributeType::String))?
    .with_attribute(
        "occi.networkinterface.allocation",
        mutable(AttributeType::String).with_pattern("dynamic|static")?,
    )?;
    collection.add_mixin(ipnetworkinterface);

    let storagelink = Kind::new(INFRASTRUCTURE_SCHEME, "storagelink")?
        .with_title("StorageLink")
        .with_parent(core_id("link")?)
        .with_attribute("occi.storagelink.deviceid", mutable(AttributeType::String))?
        .with_attribute("occi.storagelink.mountpoint", mutable(AttributeType::String))?
        .with_attribute("occi.storagelink.state", state("active|inactive|error")?)?
        .with_attribute("occi.storagelink.state.message", string())?;
    collection.add_kind(storagelink);
    Ok(())
}

fn templates(collection: &mut Collection) -> Result<()> {
    let compute = infra_id("compute")?;
    collection.add_mixin(
        Mixin::new(INFRASTRUCTURE_SCHEME, "os_tpl")?
            .with_title("Operating system template")
            .with_applies(compute.clone()),
    );
    collection.add_mixin(
        Mixin::new(INFRASTRUCTURE_SCHEME, "resource_tpl")?
            .with_title("Resource template")
            .with_applies(compute),
    );
    Ok(())
}
