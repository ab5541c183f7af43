use std::collections::HashMap;

use color_eyre::eyre::{eyre, Result};
use eframe::{run_native, App, CreationContext, NativeOptions};
use egui::Color32;
use egui_graphs::{
    DefaultGraphView, Graph, SettingsInteraction, SettingsNavigation, SettingsStyle,
};
use petgraph::{graph::EdgeIndex, graph::NodeIndex, prelude::StableGraph};

use crate::fa::FA;

struct Visualizer {
    graph: Graph,
}

impl Visualizer {
    fn new(_: &CreationContext<'_>, graph: Graph) -> Self {
        Visualizer { graph }
    }
}

impl App for Visualizer {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let navigation_settings = &SettingsNavigation::new()
                .with_zoom_and_pan_enabled(true)
                .with_fit_to_screen_enabled(true);
            let interactive_settings = &SettingsInteraction::new()
                .with_dragging_enabled(true)
                .with_node_clicking_enabled(true)
                .with_node_selection_enabled(true)
                .with_edge_clicking_enabled(true)
                .with_edge_selection_enabled(true);
            let style_settings = &SettingsStyle::default().with_labels_always(true);
            ui.add(
                &mut DefaultGraphView::new(&mut self.graph)
                    .with_styles(style_settings)
                    .with_interactions(interactive_settings)
                    .with_navigations(navigation_settings),
            );
        });
    }
}

// Collect the symbols of every transition per (from, to) pair so parallel edges become one edge
fn collect_edge_labels<T: FA>(fa: &T) -> Vec<((usize, usize), String)> {
    let mut labels: Vec<((usize, usize), String)> = Vec::new();
    let mut label_idx: HashMap<(usize, usize), usize> = HashMap::new();

    for state_idx in 0..fa.get_num_states() {
        for (symbol, target) in fa.get_state_transitions(state_idx) {
            let key = (state_idx, *target);
            match label_idx.get(&key) {
                Some(&idx) => {
                    let label = &mut labels[idx].1;
                    label.push_str(", ");
                    label.push_str(&symbol.to_string());
                }
                None => {
                    label_idx.insert(key, labels.len());
                    labels.push((key, symbol.to_string()));
                }
            }
        }
    }

    labels
}

fn generate_stable_graph<T: FA>(fa: &T) -> Graph {
    let mut stable_graph = StableGraph::new();

    let num_states = fa.get_num_states();

    let start_node_color = Color32::from_rgb(20, 67, 130);
    let accept_node_color = Color32::from_rgb(20, 130, 90);
    let trap_node_color = Color32::from_rgb(150, 40, 40);

    let edge_labels = collect_edge_labels(fa);

    let mut edge_map: HashMap<(usize, usize), EdgeIndex> = HashMap::new();

    for _state_idx in 0..num_states {
        stable_graph.add_node(());
    }

    for ((from, to), _) in edge_labels.iter() {
        let edge_idx = stable_graph.add_edge(NodeIndex::new(*from), NodeIndex::new(*to), ());
        edge_map.insert((*from, *to), edge_idx);
    }

    let mut graph = Graph::from(&stable_graph);

    for state_idx in 0..num_states {
        let node_label = format!("State {}", state_idx);
        if let Some(node) = graph.node_mut(NodeIndex::new(state_idx)) {
            node.set_label(node_label);
        }
    }

    if let Some(node) = graph.node_mut(NodeIndex::new(fa.get_start_state())) {
        node.set_color(start_node_color);
    }

    for accept_state in fa.get_acceptor_states().iter_ones() {
        if let Some(node) = graph.node_mut(NodeIndex::new(accept_state)) {
            node.set_color(accept_node_color);
        }
    }

    if let Some(trap) = fa.get_trap_state() {
        if let Some(node) = graph.node_mut(NodeIndex::new(trap)) {
            node.set_color(trap_node_color);
            node.set_label(format!("Trap {}", trap));
        }
    }

    for (key, label) in edge_labels {
        if let Some(edge) = edge_map.get(&key).and_then(|idx| graph.edge_mut(*idx)) {
            edge.set_label(label);
        }
    }

    graph
}

/// Visualizes the finite automaton provided inside an interactive window
pub fn visualize<T: FA>(fa: &T) -> Result<()> {
    let graph = generate_stable_graph(fa);
    run_native(
        "finite automata visualizer",
        NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(Visualizer::new(cc, graph)))),
    )
    .map_err(|err| eyre!("Failed to open the visualizer window: {}", err))
}
