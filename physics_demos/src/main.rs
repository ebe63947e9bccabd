//! Headless demo scenarios for the physics engine. Each scenario builds a
//! small scene, steps it at 60 Hz, and prints body state so the simulation
//! can be eyeballed without a renderer.

use physics2d::{BodyConfig, ColliderConfig, PhysicsConfig, PhysicsWorld, Shape, Vec2};
use std::env;

fn main() {
    tracing_subscriber::fmt().init();

    let args: Vec<String> = env::args().collect();
    let scenario = args.get(1).map(String::as_str).unwrap_or("bouncing_ball");

    println!("Running scenario: {scenario}");

    match scenario {
        "bouncing_ball" => run_bouncing_ball(),
        "falling_stack" => run_falling_stack(),
        "friction_ramp" => run_friction_ramp(),
        _ => println!(
            "Unknown scenario: {scenario}. Available: bouncing_ball, falling_stack, friction_ramp"
        ),
    }
}

/// World with y-down gravity and a wide static floor whose top face sits at
/// y = `floor_y`.
fn world_with_floor(floor_y: f32, elasticity: f32) -> PhysicsWorld {
    let mut world = PhysicsWorld::with_config(PhysicsConfig {
        gravity: Vec2::new(0.0, 500.0),
        ..PhysicsConfig::default()
    });
    let mut floor = ColliderConfig::new(Shape::rect(400.0, 20.0).unwrap());
    floor.position = Vec2::new(0.0, floor_y + 10.0);
    floor.elasticity = elasticity;
    world.add_collider(floor, None);
    world
}

fn run_bouncing_ball() {
    let mut world = world_with_floor(300.0, 0.9);

    let ball = world.add_body(BodyConfig {
        mass: 1.0,
        position: Vec2::new(0.0, 0.0),
        ..BodyConfig::default()
    });
    let mut collider = ColliderConfig::new(Shape::circle(10.0).unwrap());
    collider.elasticity = 0.9;
    world.add_collider(collider, Some(ball));

    let dt = 1.0 / 60.0;
    for frame in 0..240 {
        let events = world.step(dt).len();
        if frame % 20 == 0 {
            let body = world.body(ball).unwrap();
            println!(
                "t={:5.2}s  y={:7.2}  vy={:8.2}  contacts={events}",
                frame as f32 * dt,
                body.position.y,
                body.linear_velocity.y,
            );
        }
    }
}

fn run_falling_stack() {
    let mut world = world_with_floor(200.0, 0.0);

    let mut boxes = Vec::new();
    for i in 0..5 {
        let body = world.add_body(BodyConfig {
            mass: 1.0,
            position: Vec2::new(0.0, 180.0 - i as f32 * 25.0),
            ..BodyConfig::default()
        });
        world.add_collider(
            ColliderConfig::new(Shape::rect(20.0, 20.0).unwrap()),
            Some(body),
        );
        boxes.push(body);
    }

    let dt = 1.0 / 60.0;
    for _ in 0..300 {
        world.step(dt);
    }

    println!("Stack after 5 seconds:");
    for (i, handle) in boxes.iter().enumerate() {
        let body = world.body(*handle).unwrap();
        println!(
            "  box {i}: y={:7.2}  speed={:6.3}",
            body.position.y,
            body.linear_velocity.magnitude()
        );
    }
}

fn run_friction_ramp() {
    let mut world = world_with_floor(100.0, 0.0);

    // One slippery box, one grippy box, both shoved sideways.
    let mut handles = Vec::new();
    for (label, static_friction, dynamic_friction) in
        [("slick", 0.05, 0.02), ("grippy", 2.0, 1.0)]
    {
        let body = world.add_body(BodyConfig {
            mass: 1.0,
            position: Vec2::new(-100.0, 89.0),
            linear_velocity: Vec2::new(120.0, 0.0),
            ..BodyConfig::default()
        });
        let mut collider = ColliderConfig::new(Shape::rect(20.0, 20.0).unwrap());
        collider.static_friction = static_friction;
        collider.dynamic_friction = dynamic_friction;
        world.add_collider(collider, Some(body));
        handles.push((label, body));

        let dt = 1.0 / 60.0;
        for _ in 0..120 {
            world.step(dt);
        }
        let stopped_at = world.body(body).unwrap().position.x;
        println!("{label}: came to rest near x={stopped_at:.1}");

        // Clear the track for the next box.
        world.body_mut(body).unwrap().position = Vec2::new(-100.0, -500.0);
    }
}
