use glam::Vec2;
use gummy_engine::{radius_for_weight, GummySpec, ParticleId, World, WorldConfig};

fn arena() -> World {
    World::new(WorldConfig::default(), 400.0, 300.0)
}

fn red(weight: f32) -> GummySpec {
    GummySpec::new("#ff0000", weight)
}

fn mean_speed(world: &World) -> f32 {
    let n = world.len().max(1) as f32;
    world.particles().iter().map(|p| p.speed()).sum::<f32>() / n
}

fn assert_contained(world: &World) {
    for p in world.particles() {
        assert!(
            p.pos.x >= p.radius - 1e-3 && p.pos.x <= world.width() - p.radius + 1e-3,
            "x out of bounds: {:?} r={}",
            p.pos,
            p.radius
        );
        assert!(
            p.pos.y + p.radius <= world.height() + 1e-3,
            "below the floor: {:?} r={}",
            p.pos,
            p.radius
        );
    }
}

#[test]
fn single_gummy_comes_to_rest_on_the_floor() {
    let mut world = arena();
    world.add_gummies(&[red(1.0)]);
    let radius = world.particles()[0].radius;

    let mut last_y = world.particles()[0].pos.y;
    let mut settled_at = None;
    for tick in 0..200 {
        world.tick();
        let y = world.particles()[0].pos.y;
        if (y - last_y).abs() < 0.01 && y > 0.0 {
            settled_at.get_or_insert(tick);
        } else {
            settled_at = None;
        }
        last_y = y;
    }

    assert!(settled_at.is_some(), "never settled, y={}", last_y);
    assert!((last_y - (300.0 - radius)).abs() < 0.5, "rests at y={}", last_y);
}

#[test]
fn bulk_add_over_cap_evicts_the_first_inserted() {
    let mut world = arena();
    let items: Vec<_> = (0..2000).map(|i| red(1.0).with_title(i.to_string())).collect();
    let evicted = world.add_gummies(&items);

    assert_eq!(evicted, 1000);
    assert_eq!(world.len(), 1000);
    let titles: Vec<usize> = world
        .particles()
        .iter()
        .map(|p| p.meta.title.as_deref().unwrap().parse().unwrap())
        .collect();
    assert_eq!(titles, (1000..2000).collect::<Vec<_>>());
}

#[test]
fn cap_holds_across_many_calls() {
    let mut world = World::new(
        WorldConfig { max_particles: 1000, ..Default::default() },
        400.0,
        300.0,
    );
    for _ in 0..3 {
        world.add_gummies(&vec![red(0.5); 400]);
        assert!(world.len() <= 1000);
    }
    assert_eq!(world.len(), 1000);
    // ids count up from 1, so the 200 oldest are gone
    assert_eq!(world.particles()[0].id, ParticleId(201));
    assert_eq!(world.particles()[999].id, ParticleId(1200));
}

#[test]
fn coincident_gummies_separate_within_a_few_ticks() {
    let mut world = arena();
    let spec = red(5.0 / 3.0);
    assert!((radius_for_weight(spec.weight) - 10.0).abs() < 1e-4);
    let a = world.add_gummy_at(&spec, Vec2::new(200.0, 150.0));
    let b = world.add_gummy_at(&spec, Vec2::new(200.0, 150.0));

    for _ in 0..3 {
        world.tick();
    }
    let d = world.get(a).unwrap().pos.distance(world.get(b).unwrap().pos);
    assert!(d >= 19.9, "still overlapping at distance {}", d);
    assert_eq!(world.len(), 2);
}

#[test]
fn overlapping_pair_converges_without_external_force() {
    let mut world = World::new(
        WorldConfig { gravity: 0.0, ..Default::default() },
        400.0,
        300.0,
    );
    let a = world.add_gummy_at(&red(2.0), Vec2::new(200.0, 150.0));
    let b = world.add_gummy_at(&red(1.0), Vec2::new(206.0, 153.0));
    for _ in 0..60 {
        world.tick();
    }
    let (pa, pb) = (world.get(a).unwrap(), world.get(b).unwrap());
    assert!(pa.pos.distance(pb.pos) >= pa.radius + pb.radius - 0.01);
}

#[test]
fn speeds_stay_bounded_with_elastic_contacts() {
    let mut world = World::new(
        WorldConfig { restitution: 1.0, seed: 7, ..Default::default() },
        400.0,
        300.0,
    );
    for i in 0..100 {
        let x = 20.0 + (i % 10) as f32 * 36.0;
        let y = 20.0 + (i / 10) as f32 * 26.0;
        world.add_gummy_at(&red((i % 3) as f32), Vec2::new(x, y));
    }
    world.shake();

    let mut peak = 0.0f32;
    for _ in 0..1000 {
        world.tick();
        for p in world.particles() {
            assert!(p.pos.is_finite() && p.vel.is_finite());
            peak = peak.max(p.speed());
        }
    }
    assert!(peak < 100.0, "speeds diverged, peak {}", peak);
}

#[test]
fn every_tick_keeps_gummies_inside_the_walls() {
    let mut world = arena();
    world.add_gummies(&vec![red(2.0); 200]);
    for tick in 0..500 {
        if tick == 250 {
            world.shake();
        }
        world.tick();
        assert_contained(&world);
    }
}

#[test]
fn shake_stirs_a_settled_pile_which_then_calms_down() {
    let mut world = arena();
    world.add_gummies(&vec![red(1.0); 30]);
    for _ in 0..400 {
        world.tick();
    }
    let resting = mean_speed(&world);
    let before: Vec<f32> = world.particles().iter().map(|p| p.speed()).collect();

    world.shake();
    world.tick();
    let stirred = mean_speed(&world);
    assert!(stirred > resting + 3.0, "shake barely moved the pile: {} -> {}", resting, stirred);
    let raised = world
        .particles()
        .iter()
        .zip(&before)
        .filter(|(p, b)| p.speed() > **b)
        .count();
    assert!(raised * 4 >= world.len() * 3, "only {} of {} sped up", raised, world.len());

    for _ in 0..900 {
        world.tick();
    }
    let calmed = mean_speed(&world);
    assert!(calmed < stirred * 0.1, "pile did not calm down: {} vs {}", calmed, stirred);
    assert!(calmed < 1.0);
}

#[test]
fn dragging_through_a_neighbor_shoves_it_along() {
    let mut world = arena();
    let a = world.add_gummy_at(&red(1.0), Vec2::new(100.0, 250.0));
    let b = world.add_gummy_at(&red(1.0), Vec2::new(180.0, 250.0));
    for _ in 0..120 {
        world.tick();
    }
    assert_eq!(world.get(b).unwrap().vel, Vec2::ZERO);

    let start = world.get(a).unwrap().pos;
    assert_eq!(world.on_pointer_down(start.x, start.y), Some(a));

    let mut x = start.x;
    let mut shoved = None;
    for _ in 0..20 {
        x += 10.0;
        world.on_pointer_move(x, start.y);
        let nb = world.get(b).unwrap();
        if nb.vel != Vec2::ZERO {
            shoved = Some((nb.vel, nb.pos));
            break;
        }
    }

    let (vel, pos) = shoved.expect("neighbor never touched");
    assert!(vel.x > 0.0, "neighbor should move away along the drag: {:?}", vel);
    assert!(pos.x > x, "neighbor should be ahead of the held gummy");

    world.on_pointer_up();
    assert_eq!(world.held(), None);
}

#[test]
fn clear_is_idempotent_and_empty_add_is_a_no_op() {
    let mut world = arena();
    world.add_gummies(&vec![red(1.0); 10]);
    world.clear();
    assert_eq!(world.len(), 0);
    world.clear();
    assert_eq!(world.len(), 0);

    assert_eq!(world.add_gummies(&[]), 0);
    assert_eq!(world.len(), 0);
    assert!(world.is_idle());
    world.tick();
}

#[test]
fn gummy_json_round_trip_through_the_world() {
    let mut world = arena();
    let evicted = world
        .add_gummies_json(r##"[{"color":"#123456","weight":3,"shape":"plane","isBirthday":true}]"##)
        .unwrap();
    assert_eq!(evicted, 0);
    let p = &world.particles()[0];
    assert!(p.meta.highlighted);
    assert_eq!(p.radius, gummy_engine::HIGHLIGHT_RADIUS);
    assert!(world.add_gummies_json("not json").is_err());
    assert_eq!(world.len(), 1);
}

#[test]
fn one_giant_gummy_does_not_stall_the_pile() {
    let mut world = arena();
    world.add_gummies(&vec![red(1.0); 300]);
    for _ in 0..60 {
        world.tick();
    }

    world.add_gummies(&[GummySpec::new("#00ff00", 2000.0)]);
    let started = std::time::Instant::now();
    for _ in 0..10 {
        world.tick();
    }
    assert!(
        started.elapsed() < std::time::Duration::from_secs(5),
        "10 ticks took {:?}",
        started.elapsed()
    );
    assert_eq!(world.len(), 301);
    for p in world.particles() {
        assert!(p.pos.is_finite() && p.vel.is_finite());
    }
}
