// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new();

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = builder.with_http_listener(addr).install() {
        tracing::warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(
        "teamup_teams_created_total",
        "Teams created, labeled by creator role"
    );
    describe_counter!("teamup_teams_claimed_total", "Waiting teams claimed by mentors");
    describe_counter!("teamup_team_joins_total", "Members joined to ready teams");
    describe_counter!("teamup_team_leaves_total", "Members who left a team");
    describe_counter!("teamup_teams_ended_total", "Teams ended by a mentor");
    describe_counter!("teamup_teams_deleted_total", "Waiting teams deleted");
    describe_counter!("teamup_teams_expired_total", "Teams ended by the expiration sweep");

    info!("Metrics exporter listening on {}", addr);
}
