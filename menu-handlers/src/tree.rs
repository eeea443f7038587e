//! Static menu tree and keyboard layout.

use relay_core::MenuLayout;

pub const MAIN_MENU_LABEL: &str = "🏠 Main menu";
pub const BACK_PREFIX: &str = "⬅️ Back to ";

const BUTTONS_PER_ROW: usize = 2;

/// One menu entry. `label` is the button text that opens it; nodes without children are leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub label: String,
    pub title: String,
    pub body: String,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn leaf(label: &str, body: &str) -> Self {
        Self {
            label: label.to_string(),
            title: label.to_string(),
            body: body.to_string(),
            children: Vec::new(),
        }
    }

    pub fn section(label: &str, title: &str, body: &str, children: Vec<MenuNode>) -> Self {
        Self {
            label: label.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn back_label(&self) -> String {
        format!("{}{}", BACK_PREFIX, self.title)
    }
}

/// The whole menu. Labels are expected to be unique; lookups return the first match depth-first.
#[derive(Debug, Clone)]
pub struct MenuTree {
    root: MenuNode,
}

impl MenuTree {
    pub fn new(root: MenuNode) -> Self {
        Self { root }
    }

    /// The menu the bot ships with.
    pub fn default_tree() -> Self {
        Self::new(MenuNode::section(
            MAIN_MENU_LABEL,
            "Main menu",
            "Welcome! Pick a section below.",
            vec![
                MenuNode::section(
                    "📦 Services",
                    "Services",
                    "What we offer:",
                    vec![
                        MenuNode::leaf(
                            "📸 Media download",
                            "Send an Instagram post or reel link to our downloader bot and get \
                             the photos and videos back.",
                        ),
                        MenuNode::leaf(
                            "🎨 Image generation",
                            "Describe a picture to our image bot and it draws it for you.",
                        ),
                        MenuNode::leaf(
                            "💳 Pricing",
                            "All services are free while in beta.",
                        ),
                    ],
                ),
                MenuNode::section(
                    "🛟 Support",
                    "Support",
                    "How can we help?",
                    vec![
                        MenuNode::section(
                            "❓ FAQ",
                            "FAQ",
                            "Frequently asked questions:",
                            vec![
                                MenuNode::leaf(
                                    "Private posts",
                                    "Media from private accounts cannot be downloaded.",
                                ),
                                MenuNode::leaf(
                                    "Slow replies",
                                    "Image generation can take up to two minutes.",
                                ),
                            ],
                        ),
                        MenuNode::leaf(
                            "✉️ Contact",
                            "Write to support@example.com and we will get back to you.",
                        ),
                    ],
                ),
                MenuNode::leaf(
                    "ℹ️ About",
                    "A small collection of helper bots. Use the buttons to look around.",
                ),
            ],
        ))
    }

    pub fn root(&self) -> &MenuNode {
        &self.root
    }

    /// Finds the node opened by `label`.
    pub fn find(&self, label: &str) -> Option<&MenuNode> {
        self.path_to(|node| node.label == label)
            .and_then(|path| path.last().copied())
    }

    /// Finds the section a `⬅️ Back to {title}` button points at.
    pub fn find_back_target(&self, label: &str) -> Option<&MenuNode> {
        let title = label.strip_prefix(BACK_PREFIX)?;
        self.path_to(|node| !node.is_leaf() && node.title == title)
            .and_then(|path| path.last().copied())
    }

    /// Keyboard for `node`: its children two per row, then a navigation row. A leaf has no
    /// children of its own and shows its parent's keyboard.
    pub fn layout_for(&self, node: &MenuNode) -> MenuLayout {
        let Some(mut path) = self.path_to(|n| std::ptr::eq(n, node)) else {
            return self.root_layout();
        };
        if node.is_leaf() && path.len() > 1 {
            path.pop();
        }
        let Some(section) = path.last().copied() else {
            return self.root_layout();
        };

        let mut layout =
            MenuLayout::from_labels(section.children.iter().map(|c| c.label.clone()), BUTTONS_PER_ROW);
        if path.len() > 1 {
            let mut nav = Vec::new();
            if path.len() > 2 {
                nav.push(path[path.len() - 2].back_label());
            }
            nav.push(MAIN_MENU_LABEL.to_string());
            layout.push_row(nav);
        }
        layout
    }

    pub fn root_layout(&self) -> MenuLayout {
        self.layout_for(&self.root)
    }

    /// Root-to-node chain for the first node matching `pred`, depth-first.
    fn path_to<F>(&self, pred: F) -> Option<Vec<&MenuNode>>
    where
        F: Fn(&MenuNode) -> bool,
    {
        fn walk<'a, F: Fn(&MenuNode) -> bool>(
            node: &'a MenuNode,
            pred: &F,
            path: &mut Vec<&'a MenuNode>,
        ) -> bool {
            path.push(node);
            if pred(node) {
                return true;
            }
            for child in &node.children {
                if walk(child, pred, path) {
                    return true;
                }
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        walk(&self.root, &pred, &mut path).then_some(path)
    }
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::default_tree()
    }
}
