use std::cell::RefCell;
use std::rc::Rc;

use rustpo_pagination::{
    DataProvider, ListProvider, PaginationController, PaginationError, PaginationEvent,
};

fn record<P: DataProvider>(
    controller: &mut PaginationController<P>,
) -> Rc<RefCell<Vec<PaginationEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn entries(count: usize) -> ListProvider<String> {
    ListProvider::new((0..count).map(|index| format!("msgid {index}")).collect())
}

#[test]
fn next_page_stops_at_last_page() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    let events = record(&mut controller);

    for expected in 1..=4 {
        assert!(controller.go_to_next_page());
        assert_eq!(controller.state().current_page(), expected);
    }
    assert_eq!(controller.state().start_index(), 80);
    let last_page = controller.current_page_items();
    assert_eq!(last_page.len(), 15);
    assert_eq!(last_page[0], "msgid 80");

    assert!(!controller.go_to_next_page());
    assert_eq!(controller.state().current_page(), 4);
    assert_eq!(events.borrow().len(), 4);
}

#[test]
fn previous_page_does_not_wrap() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    let events = record(&mut controller);

    assert!(!controller.go_to_previous_page());
    assert!(controller.go_to_last_page());
    assert_eq!(controller.state().current_page(), 4);
    assert!(controller.go_to_previous_page());
    assert_eq!(controller.state().current_page(), 3);
    assert!(controller.go_to_first_page());
    assert!(!controller.go_to_first_page());
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn go_to_page_clamps_out_of_range_requests() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    let total_pages = controller.state().total_pages() as i64;

    assert!(controller.go_to_page(total_pages));
    assert_eq!(controller.state().current_page(), 4);

    assert!(controller.go_to_page(-1));
    assert_eq!(controller.state().current_page(), 0);

    assert!(!controller.go_to_page(0));
}

#[test]
fn strict_goto_rejects_missing_pages_without_notifying() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    let events = record(&mut controller);

    let err = controller.try_go_to_page(5).unwrap_err();
    assert_eq!(
        err,
        PaginationError::InvalidPage {
            page: 5,
            total_pages: 5
        }
    );
    assert!(err.is_validation());
    assert!(events.borrow().is_empty());

    assert_eq!(controller.try_go_to_page(2), Ok(true));
    assert_eq!(controller.state().current_page(), 2);
}

#[test]
fn larger_page_size_clamps_current_page() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    controller.go_to_page(3);
    let events = record(&mut controller);

    assert_eq!(controller.set_page_size(50), Ok(true));
    let state = controller.state();
    assert_eq!(state.page_size(), 50);
    assert_eq!(state.total_pages(), 2);
    assert_eq!(state.current_page(), 1);
    assert_eq!(events.borrow().as_slice(), &[PaginationEvent::StateChanged(state)]);
}

#[test]
fn zero_page_size_is_rejected_without_side_effects() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    controller.go_to_page(2);
    let before = controller.state();
    let events = record(&mut controller);

    assert_eq!(controller.set_page_size(0), Err(PaginationError::InvalidPageSize));
    assert_eq!(controller.state(), before);
    assert!(events.borrow().is_empty());
}

#[test]
fn empty_provider_has_one_empty_page() {
    let mut controller = PaginationController::new(entries(0), 20).unwrap();
    let state = controller.state();
    assert_eq!(state.total_pages(), 1);
    assert_eq!(state.current_page(), 0);
    assert!(controller.current_page_items().is_empty());
    assert!(!controller.go_to_next_page());
    assert!(!controller.go_to_last_page());
}

#[test]
fn refresh_is_idempotent() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    let events = record(&mut controller);

    controller.provider_mut().push("msgid 95".to_string());
    assert!(controller.refresh());
    assert!(!controller.refresh());
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(controller.state().total_items(), 96);
}

#[test]
fn refresh_after_shrink_clamps_with_single_notification() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    controller.go_to_page(4);
    let events = record(&mut controller);

    controller.provider_mut().truncate(40);
    assert!(controller.refresh());

    let state = controller.state();
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.total_items(), 40);
    assert_eq!(events.borrow().as_slice(), &[PaginationEvent::StateChanged(state)]);
}

#[test]
fn swapping_providers_resets_to_first_page() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    let events = record(&mut controller);

    controller.go_to_page(3);
    let browse = controller.set_data_provider(entries(30));
    assert_eq!(controller.state().current_page(), 0);
    assert_eq!(controller.state().total_items(), 30);

    controller.go_to_next_page();
    let search = controller.set_data_provider(browse);
    assert_eq!(controller.state().current_page(), 0);
    assert_eq!(controller.state().total_items(), 95);

    controller.set_data_provider(search);
    assert_eq!(controller.state().current_page(), 0);
    assert_eq!(controller.state().total_items(), 30);

    let swaps = events
        .borrow()
        .iter()
        .filter(|event| matches!(event, PaginationEvent::StateChanged(state) if state.current_page() == 0))
        .count();
    assert_eq!(swaps, 3);
}

#[test]
fn observers_see_events_in_transition_order() {
    let mut controller = PaginationController::new(entries(95), 20).unwrap();
    let order = Rc::new(RefCell::new(Vec::new()));

    for name in ["list view", "pagination bar"] {
        let order = Rc::clone(&order);
        controller.subscribe(move |event| {
            if let PaginationEvent::StateChanged(state) = event {
                order.borrow_mut().push((name, state.current_page()));
            }
        });
    }

    controller.go_to_next_page();
    controller.go_to_last_page();

    assert_eq!(
        order.borrow().as_slice(),
        &[
            ("list view", 1),
            ("pagination bar", 1),
            ("list view", 4),
            ("pagination bar", 4),
        ]
    );
}
