use std::rc::Rc;

use pretty_assertions::assert_eq;

use portal_drawer::{
    AppData, AppDataProvider, Component, DemoContent, Drawer, DrawerData, DrawerTrigger, Element,
    MountRegistry, Scope, APP_DATA_MISSING, DRAWER_PORTAL_ID, DRAWER_ROOT_ID,
    PORTAL_MOUNT_MISSING,
};

const WIDTH: usize = 80;

fn app_data(counter: u64) -> AppData {
    AppData {
        timezone: "Asia/Singapore".to_string(),
        counter,
    }
}

struct Scene {
    registry: Rc<MountRegistry>,
    provider: AppDataProvider,
}

impl Scene {
    fn new(content: Element) -> Self {
        let registry = Rc::new(MountRegistry::with_drawer_mounts());
        Self::with_registry(registry, content)
    }

    fn with_registry(registry: Rc<MountRegistry>, content: Element) -> Self {
        let trigger = DrawerTrigger::with_content(Rc::clone(&registry), content);
        let provider = AppDataProvider::new(app_data(0), Box::new(trigger));
        Self { registry, provider }
    }

    fn render(&mut self, counter: u64) -> Vec<String> {
        self.provider.set_value(app_data(counter));
        self.provider.render(&Scope::root(), WIDTH)
    }

    fn press(&mut self, key: &str) -> bool {
        self.provider.handle_event(&portal_drawer::InputEvent::key(key))
    }

    fn portal_lines(&self) -> Vec<String> {
        self.registry.resolve(DRAWER_PORTAL_ID).unwrap().lines()
    }

    fn root_lines(&self) -> Vec<String> {
        self.registry.resolve(DRAWER_ROOT_ID).unwrap().lines()
    }
}

fn labelled(label: &'static str) -> DrawerData {
    DrawerData::new(Element::new(label, move || portal_drawer::widgets::Text::new(label)))
}

#[test]
fn projected_rendering_always_matches_latest_show() {
    let sequences: [&[&'static str]; 3] = [
        &["alpha"],
        &["alpha", "beta", "gamma"],
        &["same", "same", "other", "same"],
    ];

    for sequence in sequences {
        let registry = Rc::new(MountRegistry::with_drawer_mounts());
        let mut drawer = Drawer::new(Rc::clone(&registry));
        let portal = registry.resolve(DRAWER_PORTAL_ID).unwrap();

        for (idx, label) in sequence.iter().enumerate() {
            drawer.show(labelled(label));
            // Every other step, stack a second show before the effect runs.
            if idx % 2 == 1 {
                drawer.show(labelled(label));
            }
            drawer.sync(WIDTH);
            drawer.portal_elem().render(&Scope::root(), WIDTH);
            assert_eq!(portal.lines(), vec![label.to_string()]);
        }
    }
}

#[test]
fn only_the_portal_follows_the_counter() {
    let mut scene = Scene::new(DemoContent::new().element());
    scene.render(0);
    assert!(scene.press("s"));
    scene.render(0);

    let root_before = scene.root_lines();
    assert_eq!(root_before, vec![APP_DATA_MISSING]);
    assert_eq!(
        scene.portal_lines(),
        vec!["App Data: Timezone is Asia/Singapore, Counter is 0"]
    );

    let root_writes = scene.registry.resolve(DRAWER_ROOT_ID).unwrap().write_count();
    for counter in 1..=3 {
        scene.render(counter);
        assert_eq!(
            scene.portal_lines(),
            vec![format!(
                "App Data: Timezone is Asia/Singapore, Counter is {counter}"
            )]
        );
        assert_eq!(scene.root_lines(), root_before);
    }
    assert_eq!(
        scene.registry.resolve(DRAWER_ROOT_ID).unwrap().write_count(),
        root_writes
    );
}

#[test]
fn show_hello_renders_message_timezone_and_counter() {
    let mut scene = Scene::new(DemoContent::with_message("Hello").element());
    scene.render(7);
    scene.press("enter");
    scene.render(7);

    let portal = scene.portal_lines().join("\n");
    assert!(portal.contains("Hello"));
    assert!(portal.contains("Asia/Singapore"));
    assert!(portal.contains("Counter is 7"));
}

#[test]
fn missing_portal_mount_renders_notice_in_place() {
    let registry = Rc::new(MountRegistry::with_drawer_mounts());
    registry.set_attached(DRAWER_PORTAL_ID, false);
    let mut scene = Scene::with_registry(registry, DemoContent::new().element());

    let lines = scene.render(0);
    assert_eq!(lines.last().map(String::as_str), Some(PORTAL_MOUNT_MISSING));

    scene.press("s");
    let lines = scene.render(1);
    assert_eq!(lines.last().map(String::as_str), Some(PORTAL_MOUNT_MISSING));
    assert_eq!(scene.root_lines(), vec![APP_DATA_MISSING]);
}

#[test]
fn consumer_without_provider_renders_notice() {
    let mut content = DemoContent::new();
    assert_eq!(content.render(&Scope::root(), WIDTH), vec![APP_DATA_MISSING]);
}

#[test]
fn close_clears_both_mounts() {
    let mut scene = Scene::new(DemoContent::new().element());
    scene.render(0);
    scene.press("s");
    scene.render(1);
    assert!(!scene.portal_lines().is_empty());
    assert!(!scene.root_lines().is_empty());

    assert!(scene.press("c"));
    scene.render(2);
    assert!(scene.portal_lines().is_empty());
    assert!(scene.root_lines().is_empty());
}

#[test]
fn missing_root_mount_is_silent() {
    let registry = Rc::new(MountRegistry::with_drawer_mounts());
    registry.set_attached(DRAWER_ROOT_ID, false);
    let mut scene = Scene::with_registry(Rc::clone(&registry), DemoContent::new().element());

    scene.render(0);
    scene.press("s");
    let lines = scene.render(3);

    assert!(!lines.iter().any(|line| line.contains("Failed")));
    assert_eq!(
        scene.portal_lines(),
        vec!["App Data: Timezone is Asia/Singapore, Counter is 3"]
    );
    let root = registry.get_element_by_id(DRAWER_ROOT_ID);
    assert!(root.is_none());
}
