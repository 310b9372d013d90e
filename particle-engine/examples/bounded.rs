// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless bounded-burst demo
//!
//! A circular burst of particles bouncing inside a rectangle. Each frame
//! reports how many particles sit strictly inside the box; reflections keep
//! the population contained without ever clamping a position.

use glam::vec2;
use particle_engine::bounds::Aabb;
use particle_engine::effects::bounded_engine;
use particle_engine::engine::CollectSink;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    const FRAMES: usize = 400;
    const PARTICLES: usize = 5000;

    let bounds = Aabb::from_corners(vec2(0.0, 0.0), vec2(800.0, 600.0));
    let mut engine = bounded_engine(PARTICLES, vec2(400.0, 300.0), 2.0, bounds);

    println!("Bounded burst: {PARTICLES} particles, {FRAMES} frames");

    for frame in 0..FRAMES {
        engine.step().expect("bounce pipelines cannot fail");

        if frame % 50 == 0 {
            let mut sink = CollectSink::default();
            engine.draw(&mut sink);
            let contained = sink
                .points
                .iter()
                .filter(|vertex| bounds.contains(vertex.position))
                .count();
            println!(
                "frame {frame:>4}: {contained}/{} inside the box",
                sink.points.len()
            );
        }
    }

    println!("done");
}
