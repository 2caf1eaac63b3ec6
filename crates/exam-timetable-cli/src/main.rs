// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use exam_timetable_model::prelude::{Instance, InstanceLoader};
use exam_timetable_solver::prelude::{InfeasibilityReason, SolveOutcome, Solver};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("instances");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

fn instances() -> impl Iterator<Item = (Instance, String)> {
    let inst_dir = find_instances_dir()
        .expect("Could not find an `instances/` directory in any ancestor of CARGO_MANIFEST_DIR");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&inst_dir)
        .expect("read_dir(instances) failed")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                && e.path().extension().map(|x| x == "txt").unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();

    files.sort();
    files.into_iter().filter_map(|f| {
        let loader = InstanceLoader::default();
        match loader.from_path(&f) {
            Ok(instance) => {
                let name = f
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| f.to_string_lossy().into_owned());
                Some((instance, name))
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {}", f.display(), e);
                None
            }
        }
    })
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    iteration: usize,
    filename: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    status: &'static str,
    cost: Option<i64>,
    search_iterations: usize,
}

fn main() {
    enable_tracing();

    let mut results: Vec<RunRecord> = Vec::new();

    for (iter, (instance, file)) in instances().enumerate() {
        let iteration = iter + 1;

        tracing::info!(
            "Solving [{}] {} with {} exams, {} rooms, {} slots, {} students",
            iteration,
            file,
            instance.exam_count(),
            instance.room_count(),
            instance.slot_count(),
            instance.student_count()
        );

        let start_ts = Utc::now();
        let solver = Solver::new();

        let outcome = match solver.solve(&instance) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Rejected [{}] {}: {}", iteration, file, e);
                continue;
            }
        };

        let end_ts = Utc::now();
        let runtime = outcome.elapsed();
        let search_iterations = outcome.iterations();

        let (status, cost) = match &outcome {
            SolveOutcome::Feasible { timetable, .. } => {
                tracing::info!(
                    "Finished [{}] {}: sat, runtime={:?}",
                    iteration,
                    file,
                    runtime
                );
                println!("{}: sat", file);
                for (exam, room, slot) in timetable.iter_placements() {
                    println!(
                        "exam {}: room {}, slot {}",
                        exam.get(),
                        room.get(),
                        slot.get()
                    );
                }
                ("sat", None)
            }
            SolveOutcome::Infeasible { reason, .. } => {
                let best_cost = match reason {
                    InfeasibilityReason::Structural { exam } => {
                        tracing::info!(
                            "Finished [{}] {}: unsat (no candidate for exam {}), runtime={:?}",
                            iteration,
                            file,
                            exam.get(),
                            runtime
                        );
                        None
                    }
                    InfeasibilityReason::SearchExhausted { best_cost, .. } => {
                        tracing::info!(
                            "Finished [{}] {}: unsat (best cost {}), runtime={:?}",
                            iteration,
                            file,
                            best_cost,
                            runtime
                        );
                        Some(*best_cost)
                    }
                };
                println!("{}: unsat", file);
                ("unsat", best_cost)
            }
        };

        results.push(RunRecord {
            iteration,
            filename: file,
            start_ts,
            end_ts,
            runtime_ms: runtime.as_millis(),
            status,
            cost,
            search_iterations,
        });
    }

    // Persist results
    let out_path = PathBuf::from("solver_results.json");
    match File::create(&out_path).and_then(|mut f| {
        let json = serde_json::to_string_pretty(&results).expect("serialize results");
        f.write_all(json.as_bytes())
    }) {
        Ok(()) => {
            tracing::info!(
                "Wrote {} run record(s) to {}",
                results.len(),
                out_path.display()
            );
        }
        Err(e) => {
            tracing::error!("Failed to write results to {}: {}", out_path.display(), e);
        }
    }
}
