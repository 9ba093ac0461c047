// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// dactyl-store — Durable persistence of captured fingerprint samples.
//
// Ingestion is the durability-critical path: unlike enhancement, its
// failures always propagate, because a failed write must never be reported
// as success.

pub mod ingest;

pub use ingest::SampleStore;
