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
//! Headless fireworks demo
//!
//! Runs the four-team fireworks effect through a fixed number of frames
//! against a counting sink, printing a phase-color census as teams are born,
//! age, die, and relight. Wire the same engine to a real point renderer by
//! implementing `DrawSink` over your graphics API.

use glam::vec2;
use particle_engine::effects::fireworks_engine;
use particle_engine::{DrawSink, PointVertex, Rgba};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Sink tallying the colors of the last submitted batch.
#[derive(Default)]
struct CensusSink {
    batches: usize,
    white: usize,
    red: usize,
    green: usize,
    blue: usize,
    magenta: usize,
}

impl CensusSink {
    fn reset(&mut self) {
        *self = CensusSink {
            batches: self.batches,
            ..CensusSink::default()
        };
    }
}

impl DrawSink for CensusSink {
    fn submit(&mut self, batch: &[PointVertex]) {
        self.batches += 1;
        for vertex in batch {
            match vertex.color {
                Rgba::WHITE => self.white += 1,
                Rgba::RED => self.red += 1,
                Rgba::GREEN => self.green += 1,
                Rgba::BLUE => self.blue += 1,
                Rgba::MAGENTA => self.magenta += 1,
                _ => {}
            }
        }
    }
}

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    const FRAMES: usize = 600;
    const TEAM_SIZE: usize = 1000;

    let mut engine = fireworks_engine(400, vec2(400.0, 300.0), 0.5, TEAM_SIZE);
    let mut sink = CensusSink::default();

    println!("Fireworks: {} particles, {FRAMES} frames", engine.particle_count());

    for frame in 0..FRAMES {
        engine
            .step()
            .expect("fireworks age segments cover the whole lifetime");

        sink.reset();
        engine.draw(&mut sink);

        if frame % 100 == 0 {
            println!(
                "frame {frame:>4}: white {:>5}  red {:>5}  green {:>5}  blue {:>5}  magenta {:>5}",
                sink.white, sink.red, sink.green, sink.blue, sink.magenta
            );
        }
    }

    println!("done: {} batches submitted", sink.batches);
}
