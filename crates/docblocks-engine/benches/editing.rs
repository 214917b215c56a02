use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use docblocks_engine::editing::{
    Cmd, Document, EditorState, HoverAction, HoverEvent, HoverPlugin, Transaction,
};
use std::hint::black_box;
mod common;

fn hovered_state(body: &str) -> EditorState {
    let doc = Document::from_bytes(body.as_bytes()).unwrap();
    let pos = body.find("- list item").unwrap() + 2;
    let mut state = EditorState::new(doc).with_plugin(HoverPlugin::new("li", "list_item"));
    let hover = HoverAction {
        event: HoverEvent::Mouseover,
        pos,
    };
    state.dispatch(Transaction::new().set_meta("li", hover)).unwrap();
    state
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("editing");
    group.sample_size(10);

    let body = common::generate_assignment(50);

    group.bench_function("insert_with_hover_decorations", |b| {
        b.iter_batched(
            || hovered_state(&body),
            |mut state| {
                let tr = Transaction::new().step(Cmd::InsertText {
                    at: 0,
                    text: "Typed ".to_string(),
                });
                black_box(state.dispatch(tr).unwrap());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
