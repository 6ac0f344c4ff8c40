/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: [&str; 4] = ["img", "br", "hr", "meta"];

/// A rendered UI node, consumed by whatever host draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Children spliced into the parent without a wrapper.
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.attr(name, v.to_string()),
            None => self,
        }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            Node::Fragment(nodes) => nodes.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for every element matching `pred`.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |el| {
            if pred(el) {
                found.push(el);
            }
        });
        found
    }

    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        self.find_all(&|el| el.has_class(class))
    }

    pub fn find_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        self.find_all(&|el| el.tag == tag)
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        match self {
            Node::Text(_) => {}
            Node::Element(el) => {
                visit(el);
                el.children.iter().for_each(|c| c.walk(visit));
            }
            Node::Fragment(nodes) => nodes.iter().for_each(|c| c.walk(visit)),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, html: &mut String) {
        match self {
            Node::Text(text) => html.push_str(&html_escape::encode_text(text)),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.write_html(html)),
            Node::Element(el) => {
                html.push('<');
                html.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    html.push_str(&format!(
                        " {}=\"{}\"",
                        name,
                        html_escape::encode_double_quoted_attribute(value)
                    ));
                }
                html.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }

                for child in &el.children {
                    child.write_html(html);
                }
                html.push_str(&format!("</{}>", el.tag));
            }
        }
    }
}

/// Render a sequence of nodes back to back.
pub fn render_nodes_to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node: Node = Element::new("a")
            .attr("href", "/x?a=1&b=\"2\"")
            .text("<b>bold</b> & more")
            .into();

        assert_eq!(
            node.to_html(),
            "<a href=\"/x?a=1&amp;b=&quot;2&quot;\">&lt;b&gt;bold&lt;/b&gt; &amp; more</a>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node: Node = Element::new("img").attr("src", "a.jpg").attr("alt", "A").into();
        assert_eq!(node.to_html(), "<img src=\"a.jpg\" alt=\"A\">");
    }

    #[test]
    fn test_fragment_flattens_into_parent() {
        let node: Node = Element::new("div")
            .child(Node::Fragment(vec![
                Element::new("h1").text("T").into(),
                Element::new("p").text("B").into(),
            ]))
            .into();
        assert_eq!(node.to_html(), "<div><h1>T</h1><p>B</p></div>");
    }

    #[test]
    fn test_set_attr_replaces_existing_value() {
        let el = Element::new("p").attr("class", "a").attr("class", "b");
        assert_eq!(el.attrs, vec![("class".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_find_by_class_searches_depth_first() {
        let node: Node = Element::new("nav")
            .class("navbar")
            .child(Element::new("ul").class("navbar-nav").child(Element::new("li").class("nav-item")))
            .into();

        assert_eq!(node.find_by_class("navbar").len(), 1);
        assert_eq!(node.find_by_class("nav-item")[0].tag, "li");
        assert!(node.find_by_class("menu").is_empty());
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let node: Node = Element::new("div")
            .child(Element::new("p").text("a"))
            .child(Node::text("b"))
            .into();
        assert_eq!(node.text_content(), "ab");
    }
}
