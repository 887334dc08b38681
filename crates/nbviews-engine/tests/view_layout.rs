//! Behaviour of views and their layout operations against an in-memory store

use nbviews_engine::{
    Error, NotebookViews, ViewDefaults, ViewEvent, ViewLayout, ViewState, NotebookView,
};
use nbviews_index::{NotebookViewsStore, ViewExtensionStore};
use nbviews_types::{
    Cell, CellExtensionMetadata, CellId, CellKind, CellMetadataDelta, GRID_COLUMNS, Notebook, ViewId,
    ViewRecord,
};

type Views = NotebookViews<NotebookViewsStore<'static>>;

fn notebook(cell_count: usize) -> Notebook {
    let cells = (0..cell_count)
        .map(|i| {
            Cell::new(
                CellId::new(format!("c{}", i)).unwrap(),
                CellKind::Code,
                format!("SELECT {}", i),
            )
        })
        .collect();
    Notebook::new("nb", "test notebook", cells)
}

fn views(cell_count: usize) -> Views {
    NotebookViews::new(
        notebook(cell_count),
        NotebookViewsStore::in_memory(),
        ViewDefaults::default(),
    )
}

fn cell(i: usize) -> CellId {
    CellId::new(format!("c{}", i)).unwrap()
}

#[test]
fn test_rename_to_taken_name_fails_and_keeps_name() {
    let mut views = views(1);
    let a = views.create_named_view("A").unwrap();
    let b = views.create_named_view("B").unwrap();

    let err = views.layout(&b).unwrap().rename("A").unwrap_err();
    match err {
        Error::ViewNameTaken { name } => assert_eq!(name, "A"),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(views.view(&b).unwrap().name(), "B");
    assert_eq!(views.view(&a).unwrap().name(), "A");
}

#[test]
fn test_rename_updates_store_and_frees_old_name() {
    let mut views = views(1);
    let a = views.create_named_view("A").unwrap();
    let events = views.view_mut(&a).unwrap().subscribe();

    views.layout(&a).unwrap().rename("Overview").unwrap();

    assert_eq!(views.view(&a).unwrap().name(), "Overview");
    assert!(views.store().view_name_is_taken("Overview"));
    assert!(!views.store().view_name_is_taken("A"));
    assert_eq!(
        events.try_recv().unwrap(),
        ViewEvent::ViewRenamed {
            view: a,
            name: "Overview".to_string()
        }
    );

    // same name again is a no-op
    views.layout(&a).unwrap().rename("Overview").unwrap();
    assert!(events.try_recv().is_err());
}

#[test]
fn test_blank_names_are_rejected() {
    let mut views = views(1);
    assert!(matches!(
        views.create_named_view("  "),
        Err(Error::InvalidViewName(_))
    ));
    let a = views.create_view().unwrap();
    assert!(matches!(
        views.layout(&a).unwrap().rename(""),
        Err(Error::InvalidViewName(_))
    ));
}

#[test]
fn test_default_placement_is_stacked_by_document_index() {
    let mut store = NotebookViewsStore::in_memory();
    let guid = ViewId::generate();
    store.insert_view(ViewRecord::new(guid, "V")).unwrap();
    let notebook = notebook(3);
    let mut view = NotebookView::new(guid, "V");

    let mut layout = ViewLayout::new(&mut view, &notebook, &mut store);
    layout.initialize(false).unwrap();

    for i in 0..3 {
        let meta = layout.get_cell_metadata(&cell(i)).unwrap();
        assert_eq!((meta.x, meta.y), (0, i as u32 * 4));
        assert_eq!((meta.width, meta.height), (12, 4));
        assert!(!meta.hidden);
    }
}

#[test]
fn test_initialize_does_not_overwrite_existing_records() {
    let mut views = views(2);
    let a = views.create_view().unwrap();
    views.layout(&a).unwrap().move_cell(&cell(1), 6, 0).unwrap();

    views.layout(&a).unwrap().initialize(false).unwrap();

    let layout = views.layout(&a).unwrap();
    let meta = layout.get_cell_metadata(&cell(1)).unwrap();
    assert_eq!((meta.x, meta.y), (6, 0));
}

#[test]
fn test_compaction_leaves_no_overlap_and_respects_width() {
    let mut views = views(6);
    let a = views.create_view().unwrap();
    {
        let mut layout = views.layout(&a).unwrap();
        layout.resize_cell(&cell(0), Some(6), Some(3)).unwrap();
        layout.resize_cell(&cell(1), Some(4), Some(5)).unwrap();
        layout.resize_cell(&cell(2), Some(7), None).unwrap();
        layout.resize_cell(&cell(3), Some(2), Some(2)).unwrap();
        layout.move_cell(&cell(4), 3, 40).unwrap();
        layout.hide_cell(&cell(5)).unwrap();

        layout.compact_cells().unwrap();
    }

    let layout = views.layout(&a).unwrap();
    let displayed = layout.displayed_cells();
    assert_eq!(displayed.len(), 5);

    let metas: Vec<_> = displayed
        .iter()
        .map(|c| *layout.get_cell_metadata(&c.id).unwrap())
        .collect();
    for (i, a) in metas.iter().enumerate() {
        assert!(a.x % GRID_COLUMNS + a.width <= GRID_COLUMNS);
        for b in &metas[i + 1..] {
            assert!(
                a.x + a.width <= b.x
                    || b.x + b.width <= a.x
                    || a.y + a.height <= b.y
                    || b.y + b.height <= a.y,
                "{:?} collides with {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_compaction_positions_and_hidden_cells_untouched() {
    let mut views = views(4);
    let a = views.create_view().unwrap();
    let mut layout = views.layout(&a).unwrap();
    layout.resize_cell(&cell(1), Some(6), None).unwrap();
    layout.resize_cell(&cell(2), Some(6), None).unwrap();
    layout.hide_cell(&cell(3)).unwrap();
    layout.move_cell(&cell(3), 0, 99).unwrap();

    let placements = layout.compact_cells().unwrap();

    let origins: Vec<(u32, u32)> = placements.iter().map(|p| (p.rect.x, p.rect.y)).collect();
    assert_eq!(origins, vec![(0, 0), (0, 4), (6, 4)]);

    let c2 = layout.get_cell_metadata(&cell(2)).unwrap();
    assert_eq!((c2.x, c2.y, c2.width, c2.height), (6, 4, 6, 4));

    let hidden = layout.get_cell_metadata(&cell(3)).unwrap();
    assert_eq!((hidden.x, hidden.y), (0, 99));
}

#[test]
fn test_compaction_clamps_oversized_width() {
    let mut views = views(1);
    let a = views.create_view().unwrap();
    let mut layout = views.layout(&a).unwrap();
    layout.resize_cell(&cell(0), Some(30), None).unwrap();

    let placements = layout.compact_cells().unwrap();

    assert!(placements[0].clamped);
    assert_eq!(layout.get_cell_metadata(&cell(0)).unwrap().width, 12);
}

#[test]
fn test_hide_then_insert_restores_visibility() {
    let mut views = views(2);
    let a = views.create_view().unwrap();
    let events = views.view_mut(&a).unwrap().subscribe();
    let mut layout = views.layout(&a).unwrap();

    layout.hide_cell(&cell(0)).unwrap();
    assert!(layout.get_cell_metadata(&cell(0)).unwrap().hidden);
    assert_eq!(layout.hidden_cells().len(), 1);

    layout.insert_cell(&cell(0)).unwrap();
    assert!(!layout.get_cell_metadata(&cell(0)).unwrap().hidden);
    assert!(layout.displayed_cells().iter().any(|c| c.id == cell(0)));
    assert!(layout.hidden_cells().is_empty());

    let received: Vec<ViewEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            ViewEvent::CellVisibilityChanged {
                view: a,
                cell: cell(0),
                hidden: true
            },
            ViewEvent::CellVisibilityChanged {
                view: a,
                cell: cell(0),
                hidden: false
            },
        ]
    );
}

#[test]
fn test_cells_without_record_count_as_hidden() {
    let mut store = NotebookViewsStore::in_memory();
    let guid = ViewId::generate();
    store.insert_view(ViewRecord::new(guid, "V")).unwrap();
    let notebook = notebook(2);
    let mut view = NotebookView::new(guid, "V");
    let layout = ViewLayout::new(&mut view, &notebook, &mut store);

    assert!(layout.get_cell_metadata(&cell(0)).is_none());
    assert_eq!(layout.hidden_cells().len(), 2);
    assert!(layout.displayed_cells().is_empty());
}

#[test]
fn test_delete_removes_records_and_fires_once() {
    let mut views = views(3);
    let a = views.create_view().unwrap();
    let keep = views.create_view().unwrap();
    let events = views.view_mut(&a).unwrap().subscribe();

    views.delete_view(&a).unwrap();

    for i in 0..3 {
        let container = views.store().cell_metadata(&cell(i)).unwrap();
        assert!(container.view(&a).is_none());
        assert!(container.view(&keep).is_some());
    }
    assert!(views.view(&a).is_none());
    assert!(matches!(views.layout(&a), Err(Error::ViewNotFound(_))));

    let received: Vec<ViewEvent> = events.try_iter().collect();
    assert_eq!(received, vec![ViewEvent::ViewDeleted { view: a }]);
}

#[test]
fn test_resize_changes_only_given_dimension() {
    let mut views = views(2);
    let a = views.create_view().unwrap();
    let mut layout = views.layout(&a).unwrap();

    layout.resize_cell(&cell(1), Some(6), None).unwrap();
    let meta = *layout.get_cell_metadata(&cell(1)).unwrap();
    assert_eq!((meta.x, meta.y, meta.width, meta.height), (0, 4, 6, 4));

    layout.resize_cell(&cell(1), None, Some(8)).unwrap();
    let meta = *layout.get_cell_metadata(&cell(1)).unwrap();
    assert_eq!((meta.x, meta.y, meta.width, meta.height), (0, 4, 6, 8));
}

#[test]
fn test_is_new_flag_lifecycle() {
    let mut views = views(1);
    let a = views.create_view().unwrap();
    assert!(views.view(&a).unwrap().is_new());

    views.layout(&a).unwrap().mark_as_viewed();
    assert!(!views.view(&a).unwrap().is_new());

    views.layout(&a).unwrap().initialize(false).unwrap();
    assert!(!views.view(&a).unwrap().is_new());
}

#[test]
fn test_loaded_view_is_not_new() {
    let mut store = NotebookViewsStore::in_memory();
    let guid = ViewId::generate();
    store.insert_view(ViewRecord::new(guid, "Saved")).unwrap();
    let mut views = NotebookViews::new(notebook(2), store, ViewDefaults::default());

    views.load_view(&guid).unwrap();

    let view = views.view(&guid).unwrap();
    assert_eq!(view.name(), "Saved");
    assert_eq!(view.state(), ViewState::Active);
    assert!(!view.is_new());
    assert!(matches!(
        views.load_view(&ViewId::generate()),
        Err(Error::ViewNotFound(_))
    ));
}

#[test]
fn test_mutations_require_active_view() {
    let mut store = NotebookViewsStore::in_memory();
    let guid = ViewId::generate();
    store.insert_view(ViewRecord::new(guid, "V")).unwrap();
    let notebook = notebook(1);
    let mut view = NotebookView::new(guid, "V");
    let mut layout = ViewLayout::new(&mut view, &notebook, &mut store);

    let err = layout.move_cell(&cell(0), 1, 1).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidState {
            state: ViewState::Uninitialized,
            ..
        }
    ));

    layout.initialize(false).unwrap();
    layout.delete().unwrap();

    for result in [
        layout.hide_cell(&cell(0)),
        layout.insert_cell(&cell(0)),
        layout.resize_cell(&cell(0), Some(1), None),
        layout.compact_cells().map(|_| ()),
        layout.rename("W"),
        layout.save(),
        layout.delete(),
        layout.initialize(true),
    ] {
        assert!(matches!(
            result,
            Err(Error::InvalidState {
                state: ViewState::Deleted,
                ..
            })
        ));
    }
}

#[test]
fn test_update_targets_only_the_given_view() {
    let mut views = views(3);
    let a = views.create_view().unwrap();
    let b = views.create_view().unwrap();

    views
        .layout(&a)
        .unwrap()
        .update_cell(&cell(2), &b, &CellMetadataDelta::hidden(true), false)
        .unwrap();

    let container = views.store().cell_metadata(&cell(2)).unwrap();
    let in_b = container.view(&b).unwrap();
    assert!(in_b.hidden);
    assert_eq!(in_b.y, 8);
    assert!(!container.view(&a).unwrap().hidden);
}

#[test]
fn test_update_for_unknown_view_surfaces_store_error() {
    let mut views = views(1);
    let a = views.create_view().unwrap();

    let err = views
        .layout(&a)
        .unwrap()
        .update_cell(&cell(0), &ViewId::generate(), &CellMetadataDelta::hidden(true), false)
        .unwrap_err();

    assert!(matches!(err, Error::Store(nbviews_index::Error::Query(_))));
    assert!(err.to_string().contains("Unknown view"));
}

#[test]
fn test_unknown_cell_is_rejected() {
    let mut views = views(1);
    let a = views.create_view().unwrap();
    let err = views
        .layout(&a)
        .unwrap()
        .move_cell(&CellId::new("nope").unwrap(), 0, 0)
        .unwrap_err();
    assert!(matches!(err, Error::CellNotFound(_)));
}

#[test]
fn test_generated_names_skip_taken_ones() {
    let mut views = views(1);
    let first = views.create_view().unwrap();
    views.create_named_view("Untitled View 2").unwrap();
    let third = views.create_view().unwrap();

    assert_eq!(views.view(&first).unwrap().name(), "Untitled View 1");
    assert_eq!(views.view(&third).unwrap().name(), "Untitled View 3");
    assert_eq!(views.next_view_name(), "Untitled View 4");
}

#[test]
fn test_active_view_cleared_when_deleted() {
    let mut views = views(1);
    let a = views.create_view().unwrap();
    views.set_active_view(Some(a)).unwrap();
    assert_eq!(views.active_view(), Some(a));

    views.delete_view(&a).unwrap();
    assert_eq!(views.active_view(), None);
    assert!(matches!(
        views.set_active_view(Some(a)),
        Err(Error::ViewNotFound(_))
    ));
}

/// In-memory store that rejects cell writes once `writes_left` reaches zero
struct FlakyStore {
    inner: NotebookViewsStore<'static>,
    writes_left: usize,
}

impl ViewExtensionStore for FlakyStore {
    fn cell_metadata(&self, cell: &CellId) -> Option<&CellExtensionMetadata> {
        self.inner.cell_metadata(cell)
    }

    fn initialize_cell(&mut self, cell: &CellId) {
        self.inner.initialize_cell(cell)
    }

    fn update_cell(
        &mut self,
        cell: &CellId,
        view: &ViewId,
        delta: &CellMetadataDelta,
        override_existing: bool,
    ) -> nbviews_index::Result<()> {
        if self.writes_left == 0 {
            return Err(nbviews_index::Error::Query("store is read-only".to_string()));
        }
        self.writes_left -= 1;
        self.inner.update_cell(cell, view, delta, override_existing)
    }

    fn view_name_is_taken(&self, name: &str) -> bool {
        self.inner.view_name_is_taken(name)
    }

    fn views(&self) -> Vec<&ViewRecord> {
        self.inner.views()
    }

    fn view(&self, guid: &ViewId) -> Option<&ViewRecord> {
        self.inner.view(guid)
    }

    fn insert_view(&mut self, view: ViewRecord) -> nbviews_index::Result<()> {
        self.inner.insert_view(view)
    }

    fn rename_view(&mut self, guid: &ViewId, name: &str) -> nbviews_index::Result<()> {
        self.inner.rename_view(guid, name)
    }

    fn remove_view(&mut self, guid: &ViewId) -> nbviews_index::Result<()> {
        self.inner.remove_view(guid)
    }

    fn active_view(&self) -> Option<ViewId> {
        self.inner.active_view()
    }

    fn set_active_view(&mut self, guid: Option<ViewId>) -> nbviews_index::Result<()> {
        self.inner.set_active_view(guid)
    }

    fn commit(&mut self) -> nbviews_index::Result<()> {
        self.inner.commit()
    }

    fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }
}

#[test]
fn test_failed_create_leaves_no_view_behind() {
    let store = FlakyStore {
        inner: NotebookViewsStore::in_memory(),
        writes_left: 1,
    };
    let mut views = NotebookViews::new(notebook(3), store, ViewDefaults::default());

    let err = views.create_named_view("Broken").unwrap_err();
    assert!(matches!(err, Error::Store(_)));

    assert!(views.views().is_empty());
    assert!(!views.store().view_name_is_taken("Broken"));
    let first = views.store().cell_metadata(&cell(0)).unwrap();
    assert!(first.views.is_empty());

    views.create_named_view("Broken").unwrap_err();
    assert!(views.views().is_empty());
}
