use bfc_logo_grid::export::{export, ExportRequest};
use bfc_logo_grid::rendering::layout::{compute_render_plan, LayoutOptions};
use bfc_logo_grid::rendering::paint::build_display_list;
use bfc_logo_grid::rendering::raster::BlockRasterizer;
use bfc_logo_grid::{FixedSize, Member, Mode, Ratio, TierEditor};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const TIERS: [&str; 5] = ["founding", "chairmans_circle", "executive", "premier", "industry"];

fn roster(n: usize) -> Vec<Member> {
    (0..n)
        .map(|i| {
            Member::new(format!("Member {:03}", (i * 37) % n), TIERS[i % TIERS.len()])
                .with_logo(format!("logos/{}.png", i))
                .founding(i % 11 == 0)
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let members = roster(200);
    let tiered = LayoutOptions::default();
    let alpha = LayoutOptions {
        mode: Mode::Alphabetical,
        fixed_size: Some(FixedSize::new(1500, 1500)),
        ratio: Ratio::Square,
        ..Default::default()
    };

    c.bench_function("layout_tiered_200", |b| {
        b.iter(|| compute_render_plan(black_box(&members), &tiered))
    });
    c.bench_function("layout_alphabetical_200", |b| {
        b.iter(|| compute_render_plan(black_box(&members), &alpha))
    });

    let plan = compute_render_plan(&members, &alpha);
    c.bench_function("display_list_200", |b| b.iter(|| build_display_list(black_box(&plan))));
}

fn bench_editor(c: &mut Criterion) {
    let members = roster(200);
    c.bench_function("editor_reorder_and_save", |b| {
        b.iter(|| {
            let mut ed = TierEditor::new(&members);
            ed.start_drag("Member 000");
            ed.drag_over("Member 037");
            ed.drag_end(Some("Member 037"));
            ed.save()
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let members = roster(60);
    let raster = BlockRasterizer::default();
    let request = ExportRequest::new(Ratio::Landscape, Mode::Tiered);
    let mut group = c.benchmark_group("export");
    group.sample_size(10);
    group.bench_function("landscape_tiered_60", |b| {
        b.iter(|| export(black_box(&members), &request, "", &raster).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_layout, bench_editor, bench_export);
criterion_main!(benches);
