use perfmgmt_core::{
    Employee, EmployeeRepository, HierarchyError, HierarchyService, LocalStore, RepoError, Role,
};

fn seeded_store() -> LocalStore {
    let store = LocalStore::open_in_memory().unwrap();
    {
        let repo = store.employees().unwrap();
        repo.add_employee(&Employee::new(1, "CEO").with_role(Role::Boss))
            .unwrap();
        repo.add_employee(&Employee::new(2, "Ops").with_role(Role::Manager).reporting_to(1))
            .unwrap();
        repo.add_employee(&Employee::new(3, "Eng").with_role(Role::Manager).reporting_to(1))
            .unwrap();
        repo.add_employee(&Employee::new(4, "Tech").with_role(Role::Technician).reporting_to(3))
            .unwrap();
        repo.add_employee(&Employee::new(5, "Erin").reporting_to(4))
            .unwrap();
    }
    store
}

fn ids(employees: &[Employee]) -> Vec<i64> {
    employees.iter().map(|employee| employee.employee_id).collect()
}

#[test]
fn management_chain_walks_up_to_root() {
    let store = seeded_store();
    let service = HierarchyService::new(store.employees().unwrap());

    assert_eq!(ids(&service.management_chain(5).unwrap()), vec![4, 3, 1]);
    assert!(service.management_chain(1).unwrap().is_empty());
    assert_eq!(service.root_of(5).unwrap().employee_id, 1);
    assert_eq!(service.root_of(1).unwrap().employee_id, 1);
}

#[test]
fn manager_of_returns_direct_manager_or_none() {
    let store = seeded_store();
    let service = HierarchyService::new(store.employees().unwrap());

    assert_eq!(service.manager_of(4).unwrap().unwrap().employee_id, 3);
    assert_eq!(service.manager_of(1).unwrap(), None);
    assert!(matches!(
        service.manager_of(60),
        Err(HierarchyError::Repo(RepoError::NotFound { id: 60, .. }))
    ));
}

#[test]
fn all_reports_collects_transitive_subtree() {
    let store = seeded_store();
    let service = HierarchyService::new(store.employees().unwrap());

    assert_eq!(ids(&service.all_reports(1).unwrap()), vec![2, 3, 4, 5]);
    assert_eq!(ids(&service.all_reports(3).unwrap()), vec![4, 5]);
    assert!(service.all_reports(5).unwrap().is_empty());
}

#[test]
fn walks_terminate_on_cyclic_persisted_data() {
    let store = seeded_store();
    // Writes through the repository reject cycles; corrupt the rows directly.
    store
        .connection()
        .execute("UPDATE employees SET reports_to = 5 WHERE employee_id = 3;", [])
        .unwrap();

    let service = HierarchyService::new(store.employees().unwrap());
    assert!(matches!(
        service.management_chain(5),
        Err(HierarchyError::CycleDetected(_))
    ));
    assert!(matches!(
        service.all_reports(4),
        Err(HierarchyError::CycleDetected(_))
    ));
}

#[test]
fn dangling_manager_is_reported() {
    let store = seeded_store();
    store
        .connection()
        .execute_batch(
            "PRAGMA foreign_keys = OFF;
             UPDATE employees SET reports_to = 404 WHERE employee_id = 2;
             PRAGMA foreign_keys = ON;",
        )
        .unwrap();

    let service = HierarchyService::new(store.employees().unwrap());
    assert!(matches!(
        service.management_chain(2),
        Err(HierarchyError::DanglingManager {
            employee_id: 2,
            manager_id: 404
        })
    ));
}

#[test]
fn repository_cycle_guard_survives_existing_cycle() {
    let store = seeded_store();
    store
        .connection()
        .execute("UPDATE employees SET reports_to = 5 WHERE employee_id = 3;", [])
        .unwrap();

    let repo = store.employees().unwrap();
    let mut ops = repo.get_employee(2).unwrap().unwrap();
    ops.reports_to = Some(4);
    repo.update_employee(&ops).unwrap();
    assert_eq!(repo.get_employee(2).unwrap().unwrap().reports_to, Some(4));
}
