//! Browser-side tests for the JavaScript facade.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use graph_repulsion_wasm::NodeSystemWasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_worked_spring_example() {
    let mut system = NodeSystemWasm::new();
    let a = system.add_node(0.0, 0.0, 0xFF00_00FF);
    let b = system.add_node(100.0, 0.0, 0x0000_FFFF);
    assert!(system.add_bond_with_length(a, b, 50.0, 0xFFFF_FFFF).is_ok());

    assert_eq!(system.apply_bond_forces(), 0);

    assert!((system.get_node_x(a).unwrap() - 5.0).abs() < 1e-5);
    assert!((system.get_node_x(b).unwrap() - 95.0).abs() < 1e-5);
}

#[wasm_bindgen_test]
fn test_invalid_bond_throws() {
    let mut system = NodeSystemWasm::new();
    let a = system.add_node(0.0, 0.0, 0);
    assert!(system.add_bond(a, a).is_err());
    assert!(system.add_bond(a, 42).is_err());
    assert_eq!(system.bond_count(), 0);
}

#[wasm_bindgen_test]
fn test_step_accepts_undefined_config() {
    let Ok(mut system) = NodeSystemWasm::demo() else {
        panic!("demo scene failed to build");
    };
    let Ok(stats) = system.step(JsValue::UNDEFINED) else {
        panic!("step rejected the default config");
    };
    assert!(stats.is_object());
    assert_eq!(system.get_positions_x_view().length(), system.node_count());
}

#[wasm_bindgen_test]
fn test_buffers_follow_insertion_order() {
    let mut system = NodeSystemWasm::new();
    let a = system.add_node(1.0, 2.0, 0x1111_11FF);
    let b = system.add_node(3.0, 4.0, 0x2222_22FF);
    assert!(system.add_bond(b, a).is_ok());

    assert_eq!(system.get_bond_endpoints(), vec![b, a]);
    assert_eq!(system.get_node_colors(), vec![0x1111_11FF, 0x2222_22FF]);
    assert_eq!(system.get_bond_colors(), vec![0]);
    assert_eq!(system.nearest_node(1.5, 2.0, 1.0), Some(a));
    assert!(system.get_centroid().is_ok());
}
