use stepflow::{Config, ConvertOptions, Editor, Position, Vars, WorkflowDefinition, graph_to_steps, steps_to_graph};

fn main() {
    let config = Config::load_from_str(include_str!("./config.toml")).unwrap();
    let workflow = WorkflowDefinition::from_json(include_str!("./workflow.json")).unwrap();
    workflow.validate().unwrap();

    let options = ConvertOptions::from_config(&config).with_start_anchor(true);
    let graph = steps_to_graph(&workflow.steps, &options);
    println!("Graph:\n{}", graph.schema());

    assert_eq!(graph_to_steps(&graph), workflow.steps);

    let mut editor = Editor::open(workflow, options);
    let id = editor.add_node("swipe_with_spectre");
    editor.update_node(&id, Vars::new().with("swipeCount", 25)).unwrap();
    editor.move_node(&id, Position::new(0.0, 0.0)).unwrap();

    println!("Steps: {}", editor.export_json().unwrap());
    println!("{}", editor.export_dot());
}
