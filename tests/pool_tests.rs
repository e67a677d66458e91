//! Spawn resolution integration tests
//!
//! The custom pool installed in front of the game's own pool.

mod common;

use common::fixtures::create_test_item;
use common::TestHost;
use contentlib_core::{GameObject, Result};
use contentlib_service::{PoolHost, PrefabPool};
use glam::{Quat, Vec3};
use std::sync::Arc;

/// Game pool returning one fixed object for every request
struct FixedPool(GameObject);

impl PrefabPool for FixedPool {
    fn instantiate(&self, _id: &str, _position: Option<Vec3>, _rotation: Option<Quat>) -> Result<Option<GameObject>> {
        Ok(Some(self.0.clone()))
    }

    fn destroy(&self, _object: GameObject) {}
}

#[test]
fn test_unknown_ids_pass_through_to_previous_pool() {
    let host = TestHost::new();
    let marker = GameObject::new("Vanilla Thing");
    host.pool_host.set_pool(Arc::new(FixedPool(marker.clone())));

    assert!(host.services.network.install(host.pool_host.as_ref()));

    let spawned = host
        .pool_host
        .instantiate("Valuables/Vase", Vec3::ZERO, Quat::IDENTITY)
        .unwrap()
        .unwrap();
    assert!(spawned.same_instance(&marker));
}

#[test]
fn test_install_happens_once() {
    let host = TestHost::new();
    assert!(host.services.network.install(host.pool_host.as_ref()));
    assert!(!host.services.network.install(host.pool_host.as_ref()));
    assert!(host.services.network.is_installed());
}

#[test]
fn test_registered_template_spawns_fresh_copy() {
    let host = TestHost::new();
    host.services.network.install(host.pool_host.as_ref());

    let source = host.plugin_source("Zehs-Plugin");
    let item = create_test_item("Cart", "Item Cart");
    host.services.items.register(item.clone(), &source).unwrap();

    let template = item.prefab.clone().unwrap();
    let position = Vec3::new(1.0, 2.0, 3.0);

    let copy = host
        .pool_host
        .instantiate("items/item cart", position, Quat::IDENTITY)
        .unwrap()
        .unwrap();

    assert_ne!(copy.id(), template.id());
    assert_eq!(copy.position(), position);
    assert!(template.is_active());
    assert_eq!(host.factory.spawned(), 1);
}

#[test]
fn test_case_variants_share_one_entry() {
    let host = TestHost::new();
    let pool = host.services.network.pool();
    let template = GameObject::new("Foo");

    assert!(pool.register_template("Foo", &template).unwrap());
    assert!(!pool.register_template("foo", &template).unwrap());
    assert!(!pool.register_template("FOO", &GameObject::new("Other")).unwrap());

    for id in ["Foo", "foo", "FOO"] {
        assert!(pool.has_template(id));
        assert!(pool.get_template(id).unwrap().same_instance(&template));
    }
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_network_spawn_refuses_unknown_ids() {
    let host = TestHost::with_builtin(["Valuables/Vase"]);
    host.services.network.install(host.pool_host.as_ref());

    let spawned = host
        .services
        .network
        .spawn("Items/Item Missing", Some(Vec3::ZERO), Some(Quat::IDENTITY))
        .unwrap();
    assert!(spawned.is_none());
    assert!(host.services.network.spawn("  ", None, None).is_err());
}

#[test]
fn test_missing_pose_is_replaced() {
    let host = TestHost::new();
    let pool = host.services.network.pool();
    pool.register_template("Items/Item Lamp", &GameObject::new("Item Lamp")).unwrap();

    let copy = pool
        .instantiate("Items/Item Lamp", None, Some(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0)))
        .unwrap()
        .unwrap();

    assert_eq!(copy.position(), Vec3::ZERO);
    assert_eq!(copy.rotation(), Quat::IDENTITY);
}
