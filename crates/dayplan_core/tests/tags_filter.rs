use dayplan_core::{Clock, MemoryTodoRepository, TagFilter, TaskTag, TodoService};
use std::cell::Cell;

struct StepClock {
    next: Cell<i64>,
}

impl Clock for StepClock {
    fn now_epoch_ms(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now + 1);
        now
    }
}

fn service() -> TodoService<MemoryTodoRepository> {
    TodoService::load_with_clock(
        MemoryTodoRepository::new(),
        Box::new(StepClock {
            next: Cell::new(1_716_200_000_000),
        }),
    )
}

#[test]
fn toggle_tag_is_its_own_inverse() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    let report = svc.add_task(work, "Write report").unwrap();

    assert!(svc.toggle_tag(work, report, TaskTag::Priority));
    assert_eq!(svc.dividers()[0].tasks[0].tag, Some(TaskTag::Priority));

    assert!(svc.toggle_tag(work, report, TaskTag::Priority));
    assert_eq!(svc.dividers()[0].tasks[0].tag, None);
}

#[test]
fn toggling_a_different_tag_replaces_the_current_one() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    let report = svc.add_task(work, "Write report").unwrap();

    assert!(svc.toggle_tag(work, report, TaskTag::Lengthy));
    assert!(svc.toggle_tag(work, report, TaskTag::Quick));
    assert_eq!(svc.dividers()[0].tasks[0].tag, Some(TaskTag::Quick));

    // Toggling the replacement again clears it, back to the prior value of
    // the double-toggle pair.
    assert!(svc.toggle_tag(work, report, TaskTag::Quick));
    assert_eq!(svc.dividers()[0].tasks[0].tag, None);
}

#[test]
fn toggle_only_touches_the_addressed_task() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    let report = svc.add_task(work, "Write report").unwrap();
    let expenses = svc.add_task(work, "File expenses").unwrap();

    assert!(svc.toggle_tag(work, report, TaskTag::DoLater));

    let divider = &svc.dividers()[0];
    assert_eq!(divider.task(report).unwrap().tag, Some(TaskTag::DoLater));
    assert_eq!(divider.task(expenses).unwrap().tag, None);
}

#[test]
fn filter_all_returns_every_task_unchanged() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    let home = svc.add_divider("Home").unwrap();
    let report = svc.add_task(work, "Write report").unwrap();
    svc.add_task(home, "Vacuum").unwrap();
    svc.toggle_tag(work, report, TaskTag::Priority);

    let view = svc.filtered(TagFilter::All);
    assert_eq!(view, svc.dividers().to_vec());
}

#[test]
fn filter_by_tag_selects_exactly_the_matching_subset() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    let home = svc.add_divider("Home").unwrap();
    let report = svc.add_task(work, "Write report").unwrap();
    let expenses = svc.add_task(work, "File expenses").unwrap();
    let vacuum = svc.add_task(home, "Vacuum").unwrap();
    svc.toggle_tag(work, report, TaskTag::Priority);
    svc.toggle_tag(work, expenses, TaskTag::Quick);
    svc.toggle_tag(home, vacuum, TaskTag::Quick);

    let view = svc.filtered(TagFilter::Tag(TaskTag::Quick));

    // Both dividers survive; only quick-tagged tasks remain inside them.
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].name, "Work");
    assert_eq!(view[0].tasks.len(), 1);
    assert_eq!(view[0].tasks[0].id, expenses);
    assert_eq!(view[1].tasks.len(), 1);
    assert_eq!(view[1].tasks[0].id, vacuum);
}

#[test]
fn filter_keeps_dividers_whose_tasks_all_fall_away() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    svc.add_divider("Empty").unwrap();
    svc.add_task(work, "Write report").unwrap();

    let view = svc.filtered(TagFilter::Tag(TaskTag::DoLater));
    assert_eq!(view.len(), 2);
    assert!(view[0].tasks.is_empty());
    assert!(view[1].tasks.is_empty());
}

#[test]
fn filter_does_not_mutate_the_underlying_store() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    let report = svc.add_task(work, "Write report").unwrap();
    svc.add_task(work, "File expenses").unwrap();
    svc.toggle_tag(work, report, TaskTag::Priority);

    let before = svc.dividers().to_vec();
    let _ = svc.filtered(TagFilter::Tag(TaskTag::Priority));
    assert_eq!(svc.dividers().to_vec(), before);
}

#[test]
fn untagged_tasks_match_no_tag_filter() {
    let mut svc = service();
    let work = svc.add_divider("Work").unwrap();
    svc.add_task(work, "Write report").unwrap();

    for tag in [
        TaskTag::Priority,
        TaskTag::Lengthy,
        TaskTag::Quick,
        TaskTag::DoLater,
    ] {
        let view = svc.filtered(TagFilter::Tag(tag));
        assert!(view[0].tasks.is_empty());
    }
}
