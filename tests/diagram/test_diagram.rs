use crate::strategy::*;
use hypercomplex_wiring::prelude::*;
use proptest::prelude::*;

fn peers(d: &Diagram, p: PortId) -> Vec<PortId> {
    d.port(p).map(|p| p.connections().collect()).unwrap_or_default()
}

#[test]
fn test_connect_then_disconnect() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::CI);
    let b = d.add_unit(UnitType::C1);
    let (out, inp) = (PortId::output(a, 1), PortId::input(b, 1));

    assert!(d.connect(out, inp));
    assert!(d.is_connected(out) && d.is_connected(inp));
    assert!(d.unit(b).unwrap().is_input_port_active(1));
    assert!(!d.unit(b).unwrap().is_input_port_active(0));

    assert!(d.disconnect(inp, out));
    assert!(!d.is_connected(out) && !d.is_connected(inp));
    assert!(!d.disconnect(out, inp));
}

#[test]
fn test_connect_twice_keeps_one_link() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::R);
    let b = d.add_unit(UnitType::R);
    let (out, inp) = (PortId::output(a, 0), PortId::input(b, 0));

    assert!(d.connect(out, inp));
    assert!(d.connect(inp, out));
    assert_eq!(peers(&d, out), vec![inp]);
    assert_eq!(peers(&d, inp), vec![out]);
    assert_eq!(d.connections().collect::<Vec<_>>(), vec![(out, inp)]);
}

#[test]
fn test_rejections() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::QI);
    let b = d.add_unit(UnitType::QI);

    // same unit
    assert!(!d.connect(PortId::output(a, 0), PortId::input(a, 0)));
    // same side
    assert!(!d.connect(PortId::output(a, 0), PortId::output(b, 0)));
    assert!(!d.connect(PortId::input(a, 0), PortId::input(b, 0)));
    // different axis
    assert!(!d.connect(PortId::output(a, 1), PortId::input(b, 2)));
    // disabled
    d.set_enabled(PortId::input(b, 3), false);
    assert!(!d.connect(PortId::output(a, 3), PortId::input(b, 3)));

    assert_eq!(d.connections().count(), 0);
}

#[test]
fn test_fan_out_and_fan_in() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::R);
    let b = d.add_unit(UnitType::R);
    let c = d.add_unit(UnitType::R);

    // one output feeding two inputs
    assert!(d.connect(PortId::output(a, 0), PortId::input(b, 0)));
    assert!(d.connect(PortId::output(a, 0), PortId::input(c, 0)));
    // one input fed by two outputs
    assert!(d.connect(PortId::output(b, 0), PortId::input(c, 0)));

    assert_eq!(peers(&d, PortId::output(a, 0)).len(), 2);
    assert_eq!(peers(&d, PortId::input(c, 0)).len(), 2);
}

#[test]
fn test_toggle_keeps_links() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::R);
    let b = d.add_unit(UnitType::R);
    let out = PortId::output(a, 0);
    assert!(d.connect(out, PortId::input(b, 0)));

    assert_eq!(d.toggle_enabled(out), Some(false));
    assert!(d.is_connected(out));
    assert!(!d.can_connect(out, PortId::input(b, 0)));
    assert_eq!(d.toggle_enabled(out), Some(true));
}

#[test]
fn test_connect_units_mixed_dimensions() {
    let mut d = Diagram::new();
    let q = d.add_unit(UnitType::QI);
    let c = d.add_unit(UnitType::CI);

    // Real matches Real; QuaternionI does not match ComplexI
    assert_eq!(d.connect_units(q, c), 1);
    assert!(d.is_connected(PortId::input(c, 0)));
    assert!(!d.is_connected(PortId::input(c, 1)));

    // biquaternion axes are distinct from named axes
    let b = d.add_unit(UnitType::B1);
    assert_eq!(d.connect_units(q, b), 0);
    assert_eq!(d.connect_units(c, c), 0);
}

#[test]
fn test_connect_units_replaces_existing_feeds() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::BI);
    let b = d.add_unit(UnitType::BJ);
    let c = d.add_unit(UnitType::BK);

    assert_eq!(d.connect_units(a, c), 8);
    assert_eq!(d.connect_units(b, c), 8);
    assert_eq!(d.connections().count(), 8);
    assert!((0..8).all(|i| !d.is_connected(PortId::output(a, i))));
}

#[test]
fn test_remove_unit_severs_links() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::Q1);
    let b = d.add_unit(UnitType::QJ);
    let c = d.add_unit(UnitType::QK);
    d.connect_units(a, b);
    d.connect_units(b, c);

    let removed = d.remove_unit(b).expect("b is in the diagram");
    assert_eq!(removed.id(), b);
    assert!(removed
        .input_ports()
        .iter()
        .chain(removed.output_ports())
        .all(|p| !p.is_connected()));

    assert_eq!(d.len(), 2);
    assert_eq!(d.connections().count(), 0);
    assert!((0..4).all(|i| !d.is_connected(PortId::output(a, i))));
    assert!((0..4).all(|i| !d.unit(c).unwrap().is_input_port_active(i)));
    assert!(d.remove_unit(b).is_none());
}

#[test]
fn test_disconnect_all_counts_links() {
    let mut d = Diagram::new();
    let a = d.add_unit(UnitType::C1);
    let b = d.add_unit(UnitType::C1);
    let c = d.add_unit(UnitType::C1);
    d.connect_units(a, b);
    d.connect_units(b, c);
    d.connect(PortId::output(a, 0), PortId::input(c, 0));

    assert_eq!(d.disconnect_all(b), 4);
    assert_eq!(d.connections().collect::<Vec<_>>().len(), 1);
    assert_eq!(d.len(), 3);
}

#[test]
fn test_add_unit_named() {
    let mut d = Diagram::new();
    let id = d.add_unit_named("biquaternion iJ").unwrap();
    assert_eq!(d.unit(id).map(|u| u.unit_type()), Some(UnitType::BiJ));
    assert_eq!(
        d.add_unit_named("octonion").err(),
        Some(Error::UnsupportedUnitType("octonion".to_string()))
    );
    assert_eq!(d.len(), 1);
}

proptest! {
    #[test]
    fn test_can_connect_is_symmetric(
        s in arb_unit_type(),
        t in arb_unit_type(),
        p in arb_port_choice(),
        q in arb_port_choice(),
    ) {
        let mut d = Diagram::new();
        let a = d.add_unit(s);
        let b = d.add_unit(t);
        let (pa, pb) = (p.resolve(a, b), q.resolve(a, b));
        d.set_enabled(pa, p.enabled);
        d.set_enabled(pb, q.enabled);

        prop_assert_eq!(d.can_connect(pa, pb), d.can_connect(pb, pa));
        if let (Some(x), Some(y)) = (d.port(pa), d.port(pb)) {
            prop_assert_eq!(x.can_connect_to(y), y.can_connect_to(x));
        }
    }

    #[test]
    fn test_links_are_symmetric(
        s in arb_unit_type(),
        t in arb_unit_type(),
        choices in proptest::collection::vec((arb_port_choice(), arb_port_choice()), 0..16),
    ) {
        let mut d = Diagram::new();
        let a = d.add_unit(s);
        let b = d.add_unit(t);
        for (p, q) in &choices {
            d.connect(p.resolve(a, b), q.resolve(a, b));
        }

        for unit in d.units() {
            for port in unit.input_ports().iter().chain(unit.output_ports()) {
                for peer in port.connections() {
                    prop_assert_ne!(peer.unit, port.unit());
                    prop_assert_ne!(peer.category, port.category());
                    prop_assert!(d.port(peer).unwrap().is_connected_to(port.id()));
                }
            }
        }
    }

    #[test]
    fn test_removal_leaves_no_dangling_peers(
        types in proptest::collection::vec(arb_unit_type(), 2..6),
        links in proptest::collection::vec((0usize..6, 0usize..6, 0usize..8), 0..24),
        removed in proptest::collection::vec(0usize..6, 1..4),
    ) {
        let mut d = Diagram::new();
        let ids: Vec<UnitId> = types.iter().map(|&t| d.add_unit(t)).collect();
        for &(src, dst, index) in &links {
            let (src, dst) = (ids[src % ids.len()], ids[dst % ids.len()]);
            d.connect(PortId::output(src, index), PortId::input(dst, index));
        }
        for &r in &removed {
            d.remove_unit(ids[r % ids.len()]);
        }

        for unit in d.units() {
            for port in unit.input_ports().iter().chain(unit.output_ports()) {
                for peer in port.connections() {
                    prop_assert!(d.contains(peer.unit));
                    prop_assert!(d.port(peer).unwrap().is_connected_to(port.id()));
                }
            }
        }
        for (out, inp) in d.connections() {
            prop_assert!(d.contains(out.unit) && d.contains(inp.unit));
        }
    }

    #[test]
    fn test_connect_disconnect_round_trip(t in arb_unit_type(), index in 0usize..8) {
        let mut d = Diagram::new();
        let a = d.add_unit(t);
        let b = d.add_unit(t);
        let (out, inp) = (PortId::output(a, index), PortId::input(b, index));

        let made = d.connect(out, inp);
        prop_assert_eq!(made, index < t.dimension());
        prop_assert_eq!(d.disconnect(out, inp), made);
        prop_assert!(!d.is_connected(out));
        prop_assert!(!d.is_connected(inp));
    }
}
